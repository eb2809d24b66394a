//! Request handlers for the `/todo` routes.
//!
//! Each handler validates in a fixed order and stops at the first failure.
//! Bodies are taken as raw bytes, the path id goes through `TodoId` and the
//! query string is read as plain pairs, so every bad request produces our own
//! 400 rather than an extractor rejection.

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    Json,
};
use todo_core::{parse_status_param, parse_todo_id, Todo, TodoPayload, ValidationError};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::TodoFilter;
use crate::AppState;

/// The `{id}` path segment parsed as a UUID. A segment that does not even
/// decode as UTF-8 is reported as an invalid id.
#[derive(Debug, Clone, Copy)]
pub struct TodoId(pub Uuid);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::from(ValidationError::InvalidId))?;
        Ok(TodoId(parse_todo_id(&raw)?))
    }
}

/// First value of `key` in the query pairs; later repeats are ignored.
fn first_param(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let mut payload = TodoPayload::from_json(&body)?;
    payload.assign_defaults();
    let todo = payload.validate()?;

    info!(todo_id = %todo.id, "Creating todo");
    state
        .store
        .create(&todo)
        .await
        .map_err(ApiError::storage("Database returned an error during creation of new todo"))?;

    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, ApiError> {
    state
        .store
        .get(id)
        .await
        .map_err(ApiError::storage("Database returned an error during retrieval of todo"))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn list_todos(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let status = parse_status_param(first_param(&pairs, "status").as_deref())?;
    let filter = TodoFilter::new(first_param(&pairs, "q"), status);

    info!(?filter, "Listing todos");
    let todos = state
        .store
        .list(&filter)
        .await
        .map_err(ApiError::storage("Database returned an error during retrieval of todos"))?;

    Ok(Json(todos))
}

pub async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    const CONTEXT: &str = "Database returned an error during update of todo";

    state
        .store
        .get(id)
        .await
        .map_err(ApiError::storage(CONTEXT))?
        .ok_or(ApiError::NotFound)?;

    let todo = TodoPayload::from_json(&body)?.validate()?;
    if todo.id != id {
        return Err(ValidationError::IdMismatch.into());
    }

    info!(todo_id = %id, "Updating todo");
    state
        .store
        .update(&todo)
        .await
        .map_err(ApiError::storage(CONTEXT))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<StatusCode, ApiError> {
    const CONTEXT: &str = "Database returned an error during delete of todo";

    state
        .store
        .get(id)
        .await
        .map_err(ApiError::storage(CONTEXT))?
        .ok_or(ApiError::NotFound)?;

    info!(todo_id = %id, "Deleting todo");
    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(ApiError::storage(CONTEXT))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::DeleteFailed)
    }
}

pub async fn health() -> &'static str {
    "ok"
}
