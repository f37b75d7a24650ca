//! Route definitions for the `/todos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::todos;
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todos::list).post(todos::create))
        .route(
            "/{id}",
            get(todos::get_by_id)
                .patch(todos::update)
                .delete(todos::delete),
        )
}
