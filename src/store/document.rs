//! Collection document I/O
//!
//! Reads and rewrites the whole JSON document. There are no partial writes.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::PersistMode;
use crate::error::{Result, StoreError};
use crate::model::TaskCollection;

/// Read and parse the document at `path`
///
/// A missing or blank file reads as an empty collection.
pub fn read_collection(path: &Path) -> Result<TaskCollection> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TaskCollection::default()),
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        return Ok(TaskCollection::default());
    }

    serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `collection` and replace the document at `path` with it
pub fn write_collection(
    path: &Path,
    collection: &TaskCollection,
    mode: PersistMode,
    pretty: bool,
) -> Result<()> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(collection)?
    } else {
        serde_json::to_vec(collection)?
    };

    match mode {
        PersistMode::Truncate => write_truncate(path, &bytes),
        PersistMode::AtomicReplace => write_atomic(path, &bytes),
    }
}

/// Check the id invariants: every id positive, no id repeated
pub fn validate_collection(collection: &TaskCollection) -> Result<()> {
    let mut seen = HashSet::with_capacity(collection.tasks.len());
    for task in &collection.tasks {
        if task.id <= 0 {
            return Err(StoreError::Task(format!("non-positive id {}", task.id)));
        }
        if !seen.insert(task.id) {
            return Err(StoreError::Task(format!("duplicate id {}", task.id)));
        }
    }
    Ok(())
}

fn write_truncate(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp_path = temp_sibling(path);

    let result = (|| -> Result<()> {
        let mut file = File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        sync_parent_dir(path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Persist the rename itself by syncing the directory entry
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<()> {
    Ok(())
}

/// `dir/tasks.json` -> `dir/.tasks.json.tmp`
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| path.as_os_str()));
    name.push(".tmp");
    path.with_file_name(name)
}
