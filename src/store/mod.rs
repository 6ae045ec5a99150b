//! Store Module
//!
//! File-backed persistence for the task collection.
//!
//! ## Responsibilities
//! - Own the on-disk document and rewrite it in full on every mutation
//! - Assign ids from a monotonic sequence seeded from the document
//! - Serialize writers against each other and against readers
//!
//! ## File Format
//! ```text
//! {
//!   "tasks": [
//!     { "id": 1, "title": "...", "done": false, "createdAt": "2024-01-01T00:00:00Z" },
//!     ...
//!   ]
//! }
//! ```

mod document;
mod file_store;

pub use document::{read_collection, validate_collection, write_collection};
pub use file_store::FileTaskStore;

use crate::error::Result;
use crate::model::{Task, TaskInput};

/// Operations over the task collection
///
/// Not-found is reported through `Option`/`bool`; `Err` is reserved for
/// storage failures that leave the operation unapplied.
pub trait TaskStore: Send + Sync {
    /// All tasks, in document order
    fn find_all(&self) -> Result<Vec<Task>>;

    /// First task with the given id
    fn find_by_id(&self, id: i64) -> Result<Option<Task>>;

    /// Persist a new task with a fresh id and the current time as `created_at`
    fn create(&self, input: TaskInput) -> Result<Task>;

    /// Replace `done`, and `title` when given. `None` if the id is unknown.
    fn update(&self, id: i64, input: TaskInput) -> Result<Option<Task>>;

    /// Remove the task with the given id, `false` if there was none
    fn delete(&self, id: i64) -> Result<bool>;
}
