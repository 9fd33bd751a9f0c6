use super::entry::DirectoryEntry;

/// Result cap used when nothing else is configured
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Primary ordering applied to query candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Blend of fuzzy score and frecency (frecency alone for empty queries)
    #[default]
    Frecency,
    /// Visit count only
    Rank,
    /// Last visit time only
    Recent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub max_results: usize,
    pub sort: SortMode,
}

impl QueryOptions {
    pub fn new(max_results: usize) -> Self {
        Self { max_results, sort: SortMode::Frecency }
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

/// A query hit with the scores that ranked it.
///
/// `fuzzy_score` is 0 for empty queries; `combined_score` is whatever key the
/// active [`SortMode`] sorted on.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub entry: DirectoryEntry,
    pub fuzzy_score: u32,
    pub frecency: f64,
    pub combined_score: f64,
}
