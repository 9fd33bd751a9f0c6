use chrono::{DateTime, Utc};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Format a Unix timestamp relative to now: "just now", "5m ago", "3h ago", "1 day ago", "12 days ago"
pub fn format_last_visit(timestamp: i64) -> String {
    format_last_visit_at(timestamp, Utc::now().timestamp())
}

pub(crate) fn format_last_visit_at(timestamp: i64, now: i64) -> String {
    let elapsed = now.saturating_sub(timestamp);

    if elapsed < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if elapsed < SECONDS_PER_HOUR {
        format!("{}m ago", elapsed / SECONDS_PER_MINUTE)
    } else if elapsed < SECONDS_PER_DAY {
        format!("{}h ago", elapsed / SECONDS_PER_HOUR)
    } else {
        match elapsed / SECONDS_PER_DAY {
            1 => "1 day ago".to_string(),
            days => format!("{} days ago", days),
        }
    }
}

/// Format a Unix timestamp with a chrono pattern, falling back to the raw number
/// when it is out of chrono's range
pub fn format_unix(timestamp: i64, pattern: &str) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(datetime) => datetime.format(pattern).to_string(),
        None => timestamp.to_string(),
    }
}
