//! Task records and the on-disk collection document.

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// A persisted task
///
/// `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub done: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Caller-supplied fields for create and update
///
/// Any `id` or `createdAt` in a request body is ignored. A missing `done`
/// reads as `false`, so an update cannot leave `done` unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub done: bool,
}

impl TaskInput {
    pub fn new(title: impl Into<String>, done: bool) -> Self {
        Self {
            title: Some(title.into()),
            done,
        }
    }

    /// Input that keeps the existing title on update
    pub fn done_only(done: bool) -> Self {
        Self { title: None, done }
    }

    /// The title, if present and not blank
    pub fn valid_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// The whole dataset as one document: `{ "tasks": [ ... ] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCollection {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Highest id present, 0 when empty
    pub fn max_id(&self) -> i64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Task>>::deserialize(deserializer)?.unwrap_or_default())
}
