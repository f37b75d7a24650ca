//! PostgreSQL-backed [`Store`].

use async_trait::async_trait;
use todo_core::types::DbId;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};
use crate::models::user::{CreateUser, Session, User};
use crate::repositories::{TodoRepo, UserRepo};
use crate::store::{Store, StoreError, TodoStore, UserStore};
use crate::DbPool;

/// Unique constraint guarding `users.email`.
const UQ_USERS_EMAIL: &str = "uq_users_email";

/// [`Store`] over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a PostgreSQL unique violation (SQLSTATE 23505) on the email constraint
/// to [`StoreError::Duplicate`]; everything else passes through.
fn classify_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(UQ_USERS_EMAIL)
        {
            return StoreError::Duplicate("email");
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, input)
            .await
            .map_err(classify_insert_error)
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn find_user_by_session(
        &self,
        id: DbId,
        session: &Session,
    ) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_session(&self.pool, id, session).await?)
    }

    async fn push_session(&self, id: DbId, session: &Session) -> Result<bool, StoreError> {
        Ok(UserRepo::push_session(&self.pool, id, session).await?)
    }

    async fn pull_session(&self, id: DbId, token: &str) -> Result<bool, StoreError> {
        Ok(UserRepo::pull_session(&self.pool, id, token).await?)
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn insert_todo(&self, input: &CreateTodo) -> Result<Todo, StoreError> {
        Ok(TodoRepo::create(&self.pool, input).await?)
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(TodoRepo::list(&self.pool).await?)
    }

    async fn find_todo(&self, id: DbId) -> Result<Option<Todo>, StoreError> {
        Ok(TodoRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update_todo(
        &self,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, StoreError> {
        Ok(TodoRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_todo(&self, id: DbId) -> Result<Option<Todo>, StoreError> {
        Ok(TodoRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
