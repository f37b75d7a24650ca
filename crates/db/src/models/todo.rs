//! Todo entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use todo_core::types::{DbId, Timestamp};

/// A todo row from the `todos` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub text: String,
    pub completed: bool,
    /// Epoch milliseconds, `null` unless completed.
    pub completed_at: Option<i64>,
    #[serde(skip)]
    pub created_at: Timestamp,
}

/// DTO for creating a new todo. `text` is already normalized.
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub text: String,
}

/// DTO for updating a todo.
///
/// `text` is optional; the completion pair is always written together.
#[derive(Debug, Clone)]
pub struct UpdateTodo {
    pub text: Option<String>,
    pub completed: bool,
    pub completed_at: Option<i64>,
}
