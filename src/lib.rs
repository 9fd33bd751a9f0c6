//! Zoink - a frecency-ranked directory index for fast navigation
//!
//! This library keeps a small on-disk database of visited directories and
//! answers "which visited directory best matches this fragment?". It provides:
//!
//! - A thread-safe entry store persisted in a compact little-endian binary file
//! - A subsequence fuzzy matcher scoring directory basenames
//! - Exponential-decay frecency ranking (visits halve in weight every 30 days)
//! - JSON configuration, shell hook scripts and the `zoink` command line
//!
//! # Example
//!
//! ```no_run
//! use zoink::Database;
//!
//! let db = Database::open("/home/alice/.config/zoink/zoink.db")?;
//! db.add_visit("/home/alice/projects/website");
//! for entry in db.query("web", 5) {
//!     println!("{} ({} visits)", entry.path, entry.visit_count);
//! }
//! db.close()?;
//! # Ok::<(), zoink::DatabaseError>(())
//! ```

pub mod cli;
pub mod config;
pub mod database;
pub mod models;
pub mod ranking;
pub mod shell;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use database::{Database, DatabaseError};
pub use models::{DirectoryEntry, MatchResult, QueryOptions, SortMode};
pub use ranking::{calculate_frecency, fuzzy_match};
