//! API Module
//!
//! HTTP surface over a [`TaskStore`].
//!
//! ## Routes
//! - `GET    /tasks`      — 200, all tasks
//! - `GET    /tasks/{id}` — 200 or 404
//! - `POST   /tasks`      — 201, 400 on missing/blank title
//! - `PUT    /tasks/{id}` — 200, 404, or 400 on missing/blank title
//! - `DELETE /tasks/{id}` — 204 or 404

mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};
pub use handlers::{create_task, delete_task, get_task, list_tasks, update_task};

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::store::TaskStore;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

/// Build the router with `store` injected as state
pub fn router(store: Arc<dyn TaskStore>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(AppState::new(store))
}
