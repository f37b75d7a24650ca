pub mod health;
pub mod todos;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                   register (public)
/// /users/login             login (public)
/// /users/me                current user (requires auth)
/// /users/me/token          logout (requires auth)
///
/// /todos                   list, create
/// /todos/{id}              get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/todos", todos::router())
}
