//! User configuration stored as JSON next to the database.
//!
//! Location: `<config dir>/zoink/config.json`, where the config dir is the
//! platform one from `dirs` (falling back to `~/.config`):
//! - Linux: `~/.config/zoink/`
//! - macOS: `~/Library/Application Support/zoink/`
//! - Windows: `%APPDATA%\zoink\`
//!
//! A missing, unreadable or malformed file is never fatal; defaults are used instead.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::search::DEFAULT_MAX_RESULTS;

const APP_DIR_NAME: &str = "zoink";
const CONFIG_FILENAME: &str = "config.json";
const DATABASE_FILENAME: &str = "zoink.db";

const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[".git", "node_modules", "__pycache__", ".vscode", ".idea"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    pub exclude_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            max_results: None,
        }
    }
}

impl Config {
    /// Load from the default location
    pub fn load() -> Result<Self> {
        let path = default_config_path()?;
        log::debug!("Using config {}", path.display());
        Ok(Self::load_from(&path))
    }

    /// Load from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Failed to read config {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to parse config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write to `path` atomically (temp file + rename)
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, json).context("Failed to write config temp file")?;
        fs::rename(&temp, path).context("Failed to rename config temp file")?;

        Ok(())
    }

    /// Database file to use: the configured one, else the default location
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(config_dir()?.join(DATABASE_FILENAME)),
        }
    }

    pub fn max_results(&self) -> usize {
        self.max_results.filter(|&n| n > 0).unwrap_or(DEFAULT_MAX_RESULTS)
    }

    /// True when any component of `path` equals an exclude pattern
    pub fn is_excluded(&self, path: &Path) -> bool {
        path.components().any(|component| {
            let name = component.as_os_str();
            self.exclude_patterns.iter().any(|pattern| name == pattern.as_str())
        })
    }
}

/// Platform config directory for zoink
pub fn config_dir() -> Result<PathBuf> {
    if let Some(base) = dirs::config_dir() {
        return Ok(base.join(APP_DIR_NAME));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join(APP_DIR_NAME))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}
