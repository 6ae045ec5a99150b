//! Request handlers
//!
//! Each handler validates input, makes one store call on the blocking pool,
//! and maps the result to a status code.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::model::{Task, TaskInput};
use crate::store::TaskStore;

use super::{ApiError, AppState};

const TITLE_REQUIRED: &str = "title is required";

/// Run a store call on the blocking pool
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn TaskStore) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("store call aborted: {e}")))?
        .map_err(ApiError::from)
}

fn validated(input: Result<Json<TaskInput>, JsonRejection>) -> Result<TaskInput, ApiError> {
    let Json(input) = input?;
    if input.valid_title().is_none() {
        return Err(ApiError::bad_request(TITLE_REQUIRED));
    }
    Ok(input)
}

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    tracing::info!("List tasks");
    let tasks = with_store(&state, |store| store.find_all()).await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Task>, ApiError> {
    let Path(id) = id?;
    tracing::info!(id, "Get task");

    match with_store(&state, move |store| store.find_by_id(id)).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn create_task(
    State(state): State<AppState>,
    input: Result<Json<TaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    tracing::info!("Create task");
    let input = validated(input).inspect_err(|e| {
        tracing::warn!("Create task rejected: {:?}", e);
    })?;

    let created = with_store(&state, move |store| store.create(input)).await?;
    tracing::info!(id = created.id, "Task created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    input: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Path(id) = id?;
    tracing::info!(id, "Update task");
    let input = validated(input).inspect_err(|e| {
        tracing::warn!(id, "Update task rejected: {:?}", e);
    })?;

    match with_store(&state, move |store| store.update(id, input)).await? {
        Some(task) => {
            tracing::info!(id, "Task updated");
            Ok(Json(task))
        }
        None => {
            tracing::warn!(id, "Update task failed: not found");
            Err(ApiError::NotFound)
        }
    }
}

pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    tracing::info!(id, "Delete task");

    if with_store(&state, move |store| store.delete(id)).await? {
        tracing::info!(id, "Task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        tracing::warn!(id, "Delete task failed: not found");
        Err(ApiError::NotFound)
    }
}
