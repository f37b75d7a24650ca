//! Repository for the `users` table.
//!
//! The `sessions` column is a JSONB array of `{kind, token}` objects. Every
//! mutation of it is a single-row `UPDATE`, which PostgreSQL applies
//! atomically.

use sqlx::types::Json;
use sqlx::PgPool;
use todo_core::types::{new_id, DbId};

use crate::models::user::{CreateUser, Session, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, sessions, created_at, updated_at";

/// Provides CRUD and session-list operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with an empty session list, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(new_id())
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (exact match on the normalized value).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find the user with `id` whose session list contains `session`.
    pub async fn find_by_session(
        pool: &PgPool,
        id: DbId,
        session: &Session,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND sessions @> $2");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(Json([session]))
            .fetch_optional(pool)
            .await
    }

    /// Append `session` to the session list. Returns `true` if the row exists.
    pub async fn push_session(
        pool: &PgPool,
        id: DbId,
        session: &Session,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET sessions = sessions || $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(Json([session]))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every session entry carrying `token`, preserving the order of
    /// the rest. Returns `true` if the row exists.
    pub async fn pull_session(pool: &PgPool, id: DbId, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                sessions = COALESCE(
                    (SELECT jsonb_agg(s.value ORDER BY s.ord)
                     FROM jsonb_array_elements(sessions) WITH ORDINALITY AS s(value, ord)
                     WHERE s.value->>'token' <> $2),
                    '[]'::jsonb),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
