use std::path::Path;

/// A single visited directory with frecency data.
///
/// `path` is the unique key of the store: an absolute, lexically cleaned path.
/// Timestamps are Unix seconds. For every stored entry `first_visited <= last_visited`
/// and `visit_count >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryEntry {
    pub path: String,
    pub visit_count: u32,
    pub last_visited: i64,
    pub first_visited: i64,
}

impl DirectoryEntry {
    /// Create an entry for a first visit at `timestamp`
    pub fn new(path: impl Into<String>, timestamp: i64) -> Self {
        Self { path: path.into(), visit_count: 1, last_visited: timestamp, first_visited: timestamp }
    }

    /// Record another visit. `last_visited` never moves backwards.
    pub fn record_visit(&mut self, timestamp: i64) {
        self.visit_count = self.visit_count.saturating_add(1);
        self.last_visited = self.last_visited.max(timestamp);
    }

    /// Final path component, the only surface fuzzy matching looks at
    pub fn basename(&self) -> &str {
        basename(&self.path)
    }
}

/// Final component of a `/`-separated path string.
///
/// Trailing separators are ignored; the root path `/` is its own basename.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(std::path::MAIN_SEPARATOR);
    if trimmed.is_empty() {
        return if path.is_empty() { "" } else { &path[..1] };
    }
    Path::new(trimmed).file_name().and_then(|name| name.to_str()).unwrap_or(trimmed)
}
