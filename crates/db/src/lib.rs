//! Persistence for users (with their embedded session lists) and todos.
//!
//! - [`store`] -- the [`Store`](store::Store) traits the HTTP layer talks to.
//! - [`pg`] -- PostgreSQL-backed implementation (sessions live in a JSONB array).
//! - [`memory`] -- in-process implementation for tests and local runs.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod pg;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use pg::PgStore;
pub use store::{Store, StoreError, TodoStore, UserStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
