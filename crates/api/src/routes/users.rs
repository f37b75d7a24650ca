//! Route definitions for the `/users` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /           -> register
/// POST   /login      -> login
/// GET    /me         -> me (requires auth)
/// DELETE /me/token   -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register))
        .route("/login", post(users::login))
        .route("/me", get(users::me))
        .route("/me/token", delete(users::logout))
}
