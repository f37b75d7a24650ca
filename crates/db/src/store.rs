//! Storage traits shared by the PostgreSQL and in-memory backends.
//!
//! A user's session list lives inside the user record, so adding and removing
//! a session are single-record atomic array updates ([`UserStore::push_session`]
//! and [`UserStore::pull_session`]). No operation spans more than one record.

use async_trait::async_trait;
use todo_core::types::DbId;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};
use crate::models::user::{CreateUser, Session, User};

/// Errors surfaced by any store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique field already holds this value.
    #[error("Duplicate value for unique field: {0}")]
    Duplicate(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence for user records and their session membership.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user with an empty session list.
    ///
    /// Fails with [`StoreError::Duplicate`] when the email is taken.
    async fn insert_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError>;

    /// Exact match on the stored (already normalized) email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Find the user with this `id` whose session list contains `session`.
    ///
    /// Both conditions must hold; either failing yields `None`.
    async fn find_user_by_session(
        &self,
        id: DbId,
        session: &Session,
    ) -> Result<Option<User>, StoreError>;

    /// Atomically append `session` to the user's session list.
    ///
    /// Returns `false` if no user with `id` exists.
    async fn push_session(&self, id: DbId, session: &Session) -> Result<bool, StoreError>;

    /// Atomically remove every entry whose token equals `token`.
    ///
    /// Returns `false` if no user with `id` exists. Removing a token that is
    /// not present is not an error.
    async fn pull_session(&self, id: DbId, token: &str) -> Result<bool, StoreError>;
}

/// Persistence for todo items.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn insert_todo(&self, input: &CreateTodo) -> Result<Todo, StoreError>;

    /// All todos, oldest first.
    async fn list_todos(&self) -> Result<Vec<Todo>, StoreError>;

    async fn find_todo(&self, id: DbId) -> Result<Option<Todo>, StoreError>;

    /// Returns `None` if no todo with `id` exists.
    async fn update_todo(&self, id: DbId, input: &UpdateTodo)
        -> Result<Option<Todo>, StoreError>;

    /// Delete and return the removed todo, or `None` if it did not exist.
    async fn delete_todo(&self, id: DbId) -> Result<Option<Todo>, StoreError>;
}

/// A complete backend: both resource stores plus a liveness probe.
#[async_trait]
pub trait Store: UserStore + TodoStore {
    async fn health_check(&self) -> Result<(), StoreError>;
}
