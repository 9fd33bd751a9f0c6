//! Ranked lookups over a set of directory entries.
//!
//! Empty queries rank purely by frecency. Non-empty queries drop every entry
//! whose basename does not fuzzy-match, then blend the normalized fuzzy score
//! with frecency. Equal keys fall back to ascending path order so results are
//! deterministic.

use std::cmp::Ordering;

use super::frecency::entry_frecency;
use super::fuzzy::fuzzy_match;
use crate::models::{DirectoryEntry, MatchResult, QueryOptions, SortMode};

/// Fuzzy scores are divided by this before blending (then clamped to 1.0)
pub const FUZZY_NORMALIZER: f64 = 1000.0;
pub const FUZZY_WEIGHT: f64 = 0.6;
pub const FRECENCY_WEIGHT: f64 = 0.4;

/// Blend a raw fuzzy score with a frecency score
pub fn combine_scores(fuzzy_score: u32, frecency: f64) -> f64 {
    let normalized_fuzzy = (f64::from(fuzzy_score) / FUZZY_NORMALIZER).min(1.0);
    normalized_fuzzy * FUZZY_WEIGHT + frecency * FRECENCY_WEIGHT
}

/// Rank `entries` against `query` as seen at time `now` (Unix seconds).
///
/// Returns at most `options.max_results` results, best first.
pub fn rank_entries<'a, I>(entries: I, query: &str, options: &QueryOptions, now: i64) -> Vec<MatchResult>
where
    I: IntoIterator<Item = &'a DirectoryEntry>,
{
    if options.max_results == 0 {
        return Vec::new();
    }

    let mut results: Vec<MatchResult> = entries
        .into_iter()
        .filter_map(|entry| score_entry(entry, query, options.sort, now))
        .collect();

    results.sort_by(compare_results);
    results.truncate(options.max_results);
    results
}

fn score_entry(entry: &DirectoryEntry, query: &str, sort: SortMode, now: i64) -> Option<MatchResult> {
    let fuzzy_score = if query.is_empty() {
        0
    } else {
        match fuzzy_match(&entry.path, query) {
            0 => return None,
            score => score,
        }
    };

    let frecency = entry_frecency(entry, now);
    let combined_score = match sort {
        SortMode::Frecency if query.is_empty() => frecency,
        SortMode::Frecency => combine_scores(fuzzy_score, frecency),
        SortMode::Rank => f64::from(entry.visit_count),
        SortMode::Recent => entry.last_visited as f64,
    };

    Some(MatchResult { entry: entry.clone(), fuzzy_score, frecency, combined_score })
}

fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.combined_score.total_cmp(&a.combined_score).then_with(|| a.entry.path.cmp(&b.entry.path))
}
