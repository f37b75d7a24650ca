//! Handlers for the `/todos` resource.
//!
//! Path ids that are not UUIDs are answered with 404 before the store is
//! consulted.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use todo_core::error::CoreError;
use todo_core::todo::{normalize_text, now_millis, resolve_completion};
use todo_core::types::{parse_id, DbId};
use todo_db::models::todo::{CreateTodo, Todo, UpdateTodo};

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::response::{TodoEnvelope, TodoList};
use crate::state::AppState;

/// Request body for `POST /todos`.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub text: String,
}

/// Request body for `PATCH /todos/{id}`. Only these two fields are honoured.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Todo",
        id: id.to_string(),
    })
}

fn todo_id(raw: &str) -> AppResult<DbId> {
    parse_id(raw).ok_or_else(|| not_found(raw))
}

/// POST /todos
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTodoRequest>,
) -> AppResult<Json<Todo>> {
    let text = normalize_text(&input.text)?;
    let todo = state.store.insert_todo(&CreateTodo { text }).await?;
    tracing::debug!(todo_id = %todo.id, "Todo created");
    Ok(Json(todo))
}

/// GET /todos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<TodoList>> {
    let todos = state.store.list_todos().await?;
    Ok(Json(TodoList { todos }))
}

/// GET /todos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<TodoEnvelope>> {
    let id = todo_id(&raw_id)?;
    let todo = state
        .store
        .find_todo(id)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;
    Ok(Json(TodoEnvelope { todo }))
}

/// DELETE /todos/{id}
///
/// Responds with the removed todo.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<TodoEnvelope>> {
    let id = todo_id(&raw_id)?;
    let todo = state
        .store
        .delete_todo(id)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;
    tracing::debug!(todo_id = %todo.id, "Todo deleted");
    Ok(Json(TodoEnvelope { todo }))
}

/// PATCH /todos/{id}
///
/// `completed: true` stamps `completedAt`; any other value, or omitting the
/// field, marks the todo not completed and clears `completedAt`.
///
/// A missing todo is reported as 404 even when `text` is also invalid.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(input): JsonBody<UpdateTodoRequest>,
) -> AppResult<Json<TodoEnvelope>> {
    let id = todo_id(&raw_id)?;
    let text = match input.text.as_deref().map(normalize_text).transpose() {
        Ok(text) => text,
        Err(invalid) => {
            if state.store.find_todo(id).await?.is_none() {
                return Err(not_found(&raw_id));
            }
            return Err(invalid.into());
        }
    };
    let completion = resolve_completion(input.completed, now_millis());

    let changes = UpdateTodo {
        text,
        completed: completion.completed,
        completed_at: completion.completed_at,
    };
    let todo = state
        .store
        .update_todo(id, &changes)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;
    Ok(Json(TodoEnvelope { todo }))
}
