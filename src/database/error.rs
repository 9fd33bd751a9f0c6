use std::path::PathBuf;

/// Failures surfaced by the directory database.
///
/// Missing files on open and missing paths on remove are not errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid database format (magic {found:#010x})")]
    InvalidMagic { found: u32 },

    #[error("unsupported database version: {found}")]
    UnsupportedVersion { found: u32 },

    #[error("entry {index} has a path that is not valid UTF-8")]
    InvalidPath { index: u32 },

    #[error("{what} does not fit the database format")]
    TooLarge { what: &'static str },

    #[error("database I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatabaseError {
    /// True for errors caused by file contents rather than the environment
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic { .. } | Self::UnsupportedVersion { .. } | Self::InvalidPath { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
