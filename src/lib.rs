//! # taskstore
//!
//! A single-resource CRUD service over tasks with:
//! - One JSON document holding the whole collection, rewritten in full per mutation
//! - Store-assigned ids that are monotonic across deletes and restarts
//! - Single-writer/multi-reader concurrency over the backing file
//! - An HTTP/JSON API on top
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server                             │
//! │                  (Multiple Clients)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Task Handlers                              │
//! │         (validation, status codes, blocking pool)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  FileTaskStore                               │
//! │        (RwLock over id sequence + backing file)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │  tasks.json   │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod store;
pub mod api;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{Config, PersistMode};
pub use model::{Task, TaskCollection, TaskInput};
pub use store::{FileTaskStore, TaskStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of taskstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
