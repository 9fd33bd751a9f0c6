use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::RwLock;
use rayon::prelude::*;

use super::codec;
use super::error::{DatabaseError, Result};
use crate::models::{DirectoryEntry, MatchResult, QueryOptions};
use crate::ranking::rank_entries;
use crate::utils::normalize_path;

/// Directory index backed by a single binary file.
///
/// The whole file is loaded on [`Database::open`] and written back wholesale on
/// [`Database::save`] / [`Database::close`]; mutations only touch memory until
/// then. Within a process every access goes through one read/write lock:
/// queries and saves share it, mutations take it exclusively. Between
/// processes there is no locking, so concurrent savers race and the last
/// rename wins.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, DirectoryEntry>>,
}

impl Database {
    /// Open (or start) the database stored at `path`.
    ///
    /// Creates the containing directory when needed. A missing file yields an
    /// empty database; a file with the wrong magic, an unknown version or
    /// truncated contents fails the open without producing partial state.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|source| DatabaseError::CreateDir { path: parent.to_path_buf(), source })?;
        }

        let entries: BTreeMap<String, DirectoryEntry> =
            codec::read_file(&path)?.into_iter().map(|entry| (entry.path.clone(), entry)).collect();

        log::debug!("Opened database {} ({} entries)", path.display(), entries.len());

        Ok(Self { path, entries: RwLock::new(entries) })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Record a visit to `path` now
    pub fn add_visit(&self, path: impl AsRef<Path>) {
        self.add_visit_at(path, Utc::now().timestamp());
    }

    /// Record a visit to `path` at an explicit Unix timestamp.
    ///
    /// The path is made absolute and cleaned first. It does not need to exist.
    pub fn add_visit_at(&self, path: impl AsRef<Path>, timestamp: i64) {
        let key = entry_key(path.as_ref());
        let mut entries = self.entries.write();

        match entries.get_mut(&key) {
            Some(entry) => entry.record_visit(timestamp),
            None => {
                entries.insert(key.clone(), DirectoryEntry::new(key, timestamp));
            }
        }
    }

    /// Snapshot of the entry for `path`, if tracked
    pub fn get(&self, path: impl AsRef<Path>) -> Option<DirectoryEntry> {
        self.entries.read().get(&entry_key(path.as_ref())).cloned()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.read().contains_key(&entry_key(path.as_ref()))
    }

    /// Forget `path`. Returns whether it was tracked; absent paths are not an error.
    pub fn remove_directory(&self, path: impl AsRef<Path>) -> bool {
        self.entries.write().remove(&entry_key(path.as_ref())).is_some()
    }

    /// Drop every entry whose directory no longer exists. Returns how many were removed.
    ///
    /// Only a definite "not found" removes an entry; paths that merely can't be
    /// inspected (permissions) are kept.
    pub fn cleanup_missing(&self) -> usize {
        let mut entries = self.entries.write();

        let missing: Vec<String> = entries
            .par_iter()
            .filter(|(path, _)| is_missing(Path::new(path.as_str())))
            .map(|(path, _)| path.clone())
            .collect();

        for path in &missing {
            log::debug!("Removing missing directory {}", path);
            entries.remove(path);
        }

        if !missing.is_empty() {
            log::info!("Cleaned up {} missing directories", missing.len());
        }

        missing.len()
    }

    /// Copy of every entry, in no particular order
    pub fn get_all(&self) -> Vec<DirectoryEntry> {
        self.entries.read().values().cloned().collect()
    }

    /// Best matches for `query`, at most `max_results` of them
    pub fn query(&self, query: &str, max_results: usize) -> Vec<DirectoryEntry> {
        self.search(query, &QueryOptions::new(max_results)).into_iter().map(|result| result.entry).collect()
    }

    /// Ranked matches with their scores
    pub fn search(&self, query: &str, options: &QueryOptions) -> Vec<MatchResult> {
        self.search_at(query, options, Utc::now().timestamp())
    }

    /// Ranked matches with frecency computed as of `now`
    pub fn search_at(&self, query: &str, options: &QueryOptions, now: i64) -> Vec<MatchResult> {
        let entries = self.entries.read();
        rank_entries(entries.values(), query, options, now)
    }

    /// Persist every entry. On failure the file on disk is unchanged.
    pub fn save(&self) -> Result<()> {
        let entries = self.entries.read();
        let written = codec::write_file(&self.path, entries.values())?;

        log::debug!("Saved {} entries ({} bytes) to {}", entries.len(), written, self.path.display());
        Ok(())
    }

    /// Save and release the database
    pub fn close(self) -> Result<()> {
        self.save()
    }
}

fn entry_key(path: &Path) -> String {
    normalize_path(path).to_string_lossy().into_owned()
}

fn is_missing(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => false,
        Err(e) => matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory),
    }
}
