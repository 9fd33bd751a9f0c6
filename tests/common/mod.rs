//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Utc;
use tempfile::TempDir;
use zoink::DirectoryEntry;
use zoink::database::codec;

pub const DAY: i64 = 86_400;

pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// Builder for database files inside a temporary directory
pub struct DatabaseBuilder {
    temp_dir: TempDir,
    entries: Vec<DirectoryEntry>,
}

impl DatabaseBuilder {
    /// Create a new builder with no entries
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, entries: Vec::new() }
    }

    /// Path the database file will be written to
    pub fn db_path(&self) -> PathBuf {
        self.temp_dir.path().join("zoink.db")
    }

    /// Add an entry with explicit statistics
    pub fn with_entry(mut self, path: &str, visits: u32, last_visited: i64, first_visited: i64) -> Self {
        self.entries.push(DirectoryEntry {
            path: path.to_string(),
            visit_count: visits,
            last_visited,
            first_visited,
        });
        self
    }

    /// Add `count` synthetic entries under `/synthetic`
    pub fn with_generated_entries(mut self, count: usize) -> Self {
        for i in 0..count {
            self.entries.push(DirectoryEntry {
                path: format!("/synthetic/dir-{:05}", i),
                visit_count: (i % 17) as u32 + 1,
                last_visited: 1_700_000_000 + i as i64,
                first_visited: 1_600_000_000 + i as i64,
            });
        }
        self
    }

    /// Write the entries with the library codec and return (temp dir, db path)
    pub fn build(self) -> (TempDir, PathBuf) {
        let path = self.db_path();
        codec::write_file(&path, self.entries.iter()).expect("Failed to write database");
        (self.temp_dir, path)
    }

    /// Write raw bytes instead of encoded entries
    pub fn build_raw(self, bytes: &[u8]) -> (TempDir, PathBuf) {
        let path = self.db_path();
        fs::write(&path, bytes).expect("Failed to write raw database");
        (self.temp_dir, path)
    }

    /// Return the temp dir without writing any database file
    pub fn build_empty(self) -> (TempDir, PathBuf) {
        let path = self.db_path();
        (self.temp_dir, path)
    }
}

impl Default for DatabaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Hand-encode a version-1 file, independent of the library codec
pub fn encode_v1(entries: &[(&str, u32, i64, i64)]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0x5A4F_494Eu32.to_le_bytes());
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for (path, visits, last, first) in entries {
        bytes.extend_from_slice(&(path.len() as u32).to_le_bytes());
        bytes.extend_from_slice(path.as_bytes());
        bytes.extend_from_slice(&visits.to_le_bytes());
        bytes.extend_from_slice(&last.to_le_bytes());
        bytes.extend_from_slice(&first.to_le_bytes());
    }
    bytes
}

/// Sorted `(path, visits, last, first)` tuples for set comparison
pub fn tuples(entries: &[DirectoryEntry]) -> Vec<(String, u32, i64, i64)> {
    let mut tuples: Vec<_> = entries
        .iter()
        .map(|e| (e.path.clone(), e.visit_count, e.last_visited, e.first_visited))
        .collect();
    tuples.sort();
    tuples
}

/// Isolated environment for running the `zoink` binary
pub struct CliEnv {
    temp_dir: TempDir,
}

impl CliEnv {
    /// Create a home directory with a config pointing the database into it
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let env = Self { temp_dir };
        let config = serde_json::json!({ "database_path": env.db_path() });
        fs::write(env.config_path(), config.to_string()).expect("Failed to write config");
        env
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.json")
    }

    pub fn db_path(&self) -> PathBuf {
        self.temp_dir.path().join("data").join("zoink.db")
    }

    /// Create a real directory under the temp root and return its path
    pub fn make_dir(&self, relative: &str) -> PathBuf {
        let dir = self.temp_dir.path().join(relative);
        fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Command for the zoink binary wired to this environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_zoink"));
        cmd.env("HOME", self.temp_dir.path())
            .env("ZOINK_CONFIG", self.config_path())
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for CliEnv {
    fn default() -> Self {
        Self::new()
    }
}
