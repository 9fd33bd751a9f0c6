//! The directory database: an in-memory entry store persisted through a
//! fixed little-endian binary file.
//!
//! # Error Handling Strategy
//!
//! Errors are returned to the caller as [`DatabaseError`] and never retried:
//!
//! - **Setup**: the containing directory cannot be created ([`DatabaseError::CreateDir`])
//! - **Format**: bad magic, unknown version or a non-UTF-8 path; the file is
//!   left untouched and no defaults are substituted
//! - **I/O**: any read, write or rename failure, including truncated files
//!
//! A missing database file and removing an untracked path are normal states.

pub mod codec;
pub mod error;
pub mod store;

pub use error::{DatabaseError, Result};
pub use store::Database;
