//! In-process [`Store`] used by the test-suite and by local runs without
//! `DATABASE_URL`.
//!
//! Every operation takes the single lock once, which gives the same
//! single-record atomicity the PostgreSQL backend relies on.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use todo_core::types::{new_id, DbId};
use tokio::sync::RwLock;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};
use crate::models::user::{CreateUser, Session, User};
use crate::store::{Store, StoreError, TodoStore, UserStore};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<DbId, User>,
    /// Insertion order doubles as listing order.
    todos: Vec<Todo>,
}

/// Thread-safe in-memory backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored todos.
    pub async fn todo_count(&self) -> usize {
        self.inner.read().await.todos.len()
    }

    /// Insert a fully-formed todo as-is (fixtures with fixed ids or
    /// completion state).
    pub async fn seed_todo(&self, todo: Todo) {
        self.inner.write().await.todos.push(todo);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == input.email) {
            return Err(StoreError::Duplicate("email"));
        }
        let now = Utc::now();
        let user = User {
            id: new_id(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            sessions: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_session(
        &self,
        id: DbId,
        session: &Session,
    ) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .get(&id)
            .filter(|u| u.sessions.contains(session))
            .cloned())
    }

    async fn push_session(&self, id: DbId, session: &Session) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&id) {
            Some(user) => {
                user.sessions.push(session.clone());
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull_session(&self, id: DbId, token: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&id) {
            Some(user) => {
                user.sessions.retain(|s| s.token != token);
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert_todo(&self, input: &CreateTodo) -> Result<Todo, StoreError> {
        let todo = Todo {
            id: new_id(),
            text: input.text.clone(),
            completed: false,
            completed_at: None,
            created_at: Utc::now(),
        };
        self.inner.write().await.todos.push(todo.clone());
        Ok(todo)
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.inner.read().await.todos.clone())
    }

    async fn find_todo(&self, id: DbId) -> Result<Option<Todo>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.todos.iter().find(|t| t.id == id).cloned())
    }

    async fn update_todo(
        &self,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(todo) = inner.todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(text) = &input.text {
            todo.text = text.clone();
        }
        todo.completed = input.completed;
        todo.completed_at = input.completed_at;
        Ok(Some(todo.clone()))
    }

    async fn delete_todo(&self, id: DbId) -> Result<Option<Todo>, StoreError> {
        let mut inner = self.inner.write().await;
        let removed = inner
            .todos
            .iter()
            .position(|t| t.id == id)
            .map(|idx| inner.todos.remove(idx));
        Ok(removed)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
