//! File-backed task store
//!
//! Every operation runs a full read → (mutate → write) cycle against the
//! backing document under one reader/writer lock.

use std::fs;
use std::path::Path;

use parking_lot::RwLock;
use time::OffsetDateTime;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::model::{Task, TaskCollection, TaskInput};

use super::document::{read_collection, validate_collection, write_collection};
use super::TaskStore;

/// Task store persisted to a single JSON document
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader
///
/// - **Reads** (find_all/find_by_id): shared lock, concurrent with each other
/// - **Writes** (create/update/delete): exclusive lock, no readers interleaved
///
/// The lock guards both the backing file and the id sequence, so a reader
/// that acquires it after a write observes that write in full. Nothing here
/// coordinates with other processes sharing the same file.
pub struct FileTaskStore {
    /// Store configuration
    config: Config,

    /// Last id handed out. Seeded from the highest id on disk, never decreases.
    sequence: RwLock<i64>,
}

impl FileTaskStore {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Create the parent directory
    /// 2. Write an empty collection if the file is absent
    /// 3. Load and validate the collection
    /// 4. Seed the sequence with the highest id present
    pub fn open(config: Config) -> Result<Self> {
        if config.data_file.as_os_str().is_empty() {
            return Err(StoreError::Config("data file path is empty".to_string()));
        }

        let path = config.data_file.as_path();
        tracing::info!("Opening task store at {}", path.display());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        if !path.exists() {
            write_collection(
                path,
                &TaskCollection::default(),
                config.persist_mode,
                config.pretty,
            )?;
        }

        let existing = read_collection(path)?;
        validate_collection(&existing)?;
        let last_id = existing.max_id();

        tracing::info!(
            tasks = existing.tasks.len(),
            last_id,
            "Task store ready"
        );

        Ok(Self {
            config,
            sequence: RwLock::new(last_id),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_file(path).build();
        Self::open(config)
    }

    fn read(&self) -> Result<TaskCollection> {
        read_collection(&self.config.data_file)
    }

    fn write(&self, collection: &TaskCollection) -> Result<()> {
        write_collection(
            &self.config.data_file,
            collection,
            self.config.persist_mode,
            self.config.pretty,
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.config.data_file
    }

    /// Get the last id handed out (0 if none)
    pub fn last_id(&self) -> i64 {
        *self.sequence.read()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl TaskStore for FileTaskStore {
    fn find_all(&self) -> Result<Vec<Task>> {
        let _guard = self.sequence.read();
        tracing::debug!("find_all");

        Ok(self.read()?.tasks)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Task>> {
        let _guard = self.sequence.read();
        tracing::debug!(id, "find_by_id");

        Ok(self.read()?.tasks.into_iter().find(|t| t.id == id))
    }

    fn create(&self, input: TaskInput) -> Result<Task> {
        let mut last_id = self.sequence.write();
        tracing::debug!("create");

        let mut collection = self.read()?;

        // Bumped before the write so a failed write never hands the id out twice
        *last_id += 1;
        let created = Task {
            id: *last_id,
            title: input.title.unwrap_or_default(),
            done: input.done,
            created_at: OffsetDateTime::now_utc(),
        };

        collection.tasks.push(created.clone());
        self.write(&collection)?;

        tracing::debug!(id = created.id, "created");
        Ok(created)
    }

    fn update(&self, id: i64, input: TaskInput) -> Result<Option<Task>> {
        let _guard = self.sequence.write();
        tracing::debug!(id, "update");

        let mut collection = self.read()?;
        let Some(existing) = collection.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(title) = input.title {
            existing.title = title;
        }
        existing.done = input.done;
        let updated = existing.clone();

        self.write(&collection)?;
        Ok(Some(updated))
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let _guard = self.sequence.write();
        tracing::debug!(id, "delete");

        let mut collection = self.read()?;
        let Some(index) = collection.tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };

        collection.tasks.remove(index);
        self.write(&collection)?;
        Ok(true)
    }
}
