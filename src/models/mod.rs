//! Data models for the directory index.
//!
//! - [`DirectoryEntry`] - One visited directory with its visit statistics
//! - [`MatchResult`] - A ranked query hit carrying its individual scores
//! - [`QueryOptions`] / [`SortMode`] - How a query orders and truncates its results

pub mod entry;
pub mod search;

pub use entry::DirectoryEntry;
pub use search::{MatchResult, QueryOptions, SortMode};
