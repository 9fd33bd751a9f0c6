//! Exponential-decay frecency: `visit_count * 0.5^(age_days / 30)`, with the
//! decay factor floored at [`MIN_RECENCY_FACTOR`].

use crate::models::DirectoryEntry;

pub const HALF_LIFE_DAYS: f64 = 30.0;
pub const MIN_RECENCY_FACTOR: f64 = 0.01;
const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Decay factor for something last touched `age_secs` seconds ago.
///
/// 1.0 at zero (or negative) age, halving every [`HALF_LIFE_DAYS`], never below
/// [`MIN_RECENCY_FACTOR`].
pub fn recency_factor(age_secs: i64) -> f64 {
    if age_secs <= 0 {
        return 1.0;
    }

    let age_days = age_secs as f64 / SECONDS_PER_DAY;
    let decay_rate = std::f64::consts::LN_2 / HALF_LIFE_DAYS;
    (-decay_rate * age_days).exp().max(MIN_RECENCY_FACTOR)
}

/// Frecency score of `visit_count` visits with the latest at `last_visited`, as seen at `now`
pub fn calculate_frecency(visit_count: u32, last_visited: i64, now: i64) -> f64 {
    f64::from(visit_count) * recency_factor(now.saturating_sub(last_visited))
}

/// Frecency score of an entry as seen at `now`
pub fn entry_frecency(entry: &DirectoryEntry, now: i64) -> f64 {
    calculate_frecency(entry.visit_count, entry.last_visited, now)
}
