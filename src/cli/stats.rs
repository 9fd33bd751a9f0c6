use crate::models::DirectoryEntry;

/// How many entries the "most visited" list shows
pub const TOP_VISITED: usize = 5;

/// Aggregates over the whole database for the `stats` report
#[derive(Debug, Clone, PartialEq)]
pub struct UsageStats {
    pub total_entries: usize,
    pub total_visits: u64,
    pub max_visits: u32,
    /// Entry with the earliest first visit
    pub oldest: DirectoryEntry,
    /// Entry with the latest last visit
    pub newest: DirectoryEntry,
    /// Most visited entries, ties broken by path
    pub top: Vec<DirectoryEntry>,
}

impl UsageStats {
    /// Returns `None` for an empty database
    pub fn from_entries(entries: &[DirectoryEntry], top_n: usize) -> Option<Self> {
        let oldest = entries
            .iter()
            .min_by(|a, b| a.first_visited.cmp(&b.first_visited).then_with(|| a.path.cmp(&b.path)))?;
        let newest = entries
            .iter()
            .max_by(|a, b| a.last_visited.cmp(&b.last_visited).then_with(|| b.path.cmp(&a.path)))?;

        let mut top: Vec<DirectoryEntry> = entries.to_vec();
        top.sort_by(|a, b| b.visit_count.cmp(&a.visit_count).then_with(|| a.path.cmp(&b.path)));
        top.truncate(top_n);

        Some(Self {
            total_entries: entries.len(),
            total_visits: entries.iter().map(|e| u64::from(e.visit_count)).sum(),
            max_visits: entries.iter().map(|e| e.visit_count).max().unwrap_or(0),
            oldest: oldest.clone(),
            newest: newest.clone(),
            top,
        })
    }

    pub fn average_visits(&self) -> f64 {
        self.total_visits as f64 / self.total_entries as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, visits: u32, first: i64, last: i64) -> DirectoryEntry {
        DirectoryEntry { path: path.to_string(), visit_count: visits, last_visited: last, first_visited: first }
    }

    #[test]
    fn test_empty_database_has_no_stats() {
        assert!(UsageStats::from_entries(&[], TOP_VISITED).is_none());
    }

    #[test]
    fn test_aggregates() {
        let entries = vec![
            entry("/a", 4, 100, 500),
            entry("/b", 1, 50, 900),
            entry("/c", 7, 300, 400),
        ];

        let stats = UsageStats::from_entries(&entries, 2).unwrap();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_visits, 12);
        assert_eq!(stats.max_visits, 7);
        assert!((stats.average_visits() - 4.0).abs() < f64::EPSILON);
        assert_eq!(stats.oldest.path, "/b");
        assert_eq!(stats.newest.path, "/b");
        assert_eq!(stats.top.iter().map(|e| e.path.as_str()).collect::<Vec<_>>(), vec!["/c", "/a"]);
    }

    #[test]
    fn test_top_ties_sorted_by_path() {
        let entries = vec![entry("/z", 2, 1, 1), entry("/a", 2, 1, 1)];
        let stats = UsageStats::from_entries(&entries, TOP_VISITED).unwrap();
        assert_eq!(stats.top[0].path, "/a");
        assert_eq!(stats.oldest.path, "/a");
        assert_eq!(stats.newest.path, "/a");
    }
}
