//! Repository for the `todos` table.

use sqlx::PgPool;
use todo_core::types::{new_id, DbId};

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, text, completed, completed_at, created_at";

/// Provides CRUD operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new (not completed) todo, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTodo) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (id, text)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(new_id())
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    /// List all todos, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Todo>(&query).fetch_all(pool).await
    }

    /// Find a todo by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a todo. `text` is applied only when present; the completion
    /// pair is always overwritten.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                text = COALESCE($2, text),
                completed = $3,
                completed_at = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.text)
            .bind(input.completed)
            .bind(input.completed_at)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a todo, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("DELETE FROM todos WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
