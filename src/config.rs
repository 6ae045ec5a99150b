//! Configuration for the task store
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};

/// Environment variable naming the backing file directly
pub const TASKS_FILE_ENV: &str = "TASKS_FILE";

/// Environment variable naming a data directory to place the file under
pub const TASKS_DATA_DIR_ENV: &str = "TASKS_DATA_DIR";

const DATA_SUBDIR: &str = "crud-file";
const DATA_FILE_NAME: &str = "tasks.json";

/// Main configuration for a task store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing JSON document holding the whole collection.
    /// The parent directory is created on open if missing.
    pub data_file: PathBuf,

    /// How the document is rewritten on every mutation
    pub persist_mode: PersistMode,

    /// Pretty-print the document on disk
    pub pretty: bool,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,
}

/// Rewrite strategy for the backing document
///
/// Both strategies write the full collection; neither appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// Truncate the backing file in place and write the new document
    Truncate,

    /// Write a sibling temp file, fsync, then rename over the backing file.
    /// A crash mid-write leaves the previous document intact.
    AtomicReplace,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: resolve_data_file(),
            persist_mode: PersistMode::AtomicReplace,
            pretty: false,
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing data file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the persist mode
    pub fn persist_mode(mut self, mode: PersistMode) -> Self {
        self.config.persist_mode = mode;
        self
    }

    /// Pretty-print the document on disk
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// Resolve the backing file from the environment.
///
/// `TASKS_FILE` wins, then `TASKS_DATA_DIR/crud-file/tasks.json`, then the
/// same layout under the system temp directory.
pub fn resolve_data_file() -> PathBuf {
    let tasks_file = std::env::var(TASKS_FILE_ENV).ok();
    let data_dir = std::env::var(TASKS_DATA_DIR_ENV).ok();
    resolve_data_file_from(
        tasks_file.as_deref(),
        data_dir.as_deref(),
        &std::env::temp_dir(),
    )
}

fn resolve_data_file_from(
    tasks_file: Option<&str>,
    data_dir: Option<&str>,
    temp_dir: &Path,
) -> PathBuf {
    if let Some(file) = non_blank(tasks_file) {
        return PathBuf::from(file);
    }

    let base = match non_blank(data_dir) {
        Some(dir) => PathBuf::from(dir),
        None => temp_dir.to_path_buf(),
    };
    base.join(DATA_SUBDIR).join(DATA_FILE_NAME)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
