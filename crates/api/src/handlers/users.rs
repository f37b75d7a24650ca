//! Handlers for the `/users` resource (register, login, current user, logout).

use axum::extract::State;
use axum::http::{HeaderName, StatusCode};
use axum::Json;
use serde::Deserialize;
use todo_core::session::SessionKind;
use todo_db::models::user::UserResponse;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::auth::{AuthUser, X_AUTH};
use crate::state::AppState;

/// Request body for `POST /users` and `POST /users/login`.
///
/// Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// A user body plus the freshly issued session token in `x-auth`.
type WithSession = ([(HeaderName, String); 1], Json<UserResponse>);

/// POST /users
///
/// Register an account and open its first session.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CredentialsRequest>,
) -> AppResult<WithSession> {
    let user = state
        .credentials
        .create(&input.email, &input.password)
        .await?;
    let token = state
        .credentials
        .add_session(&user, SessionKind::Auth)
        .await?;

    Ok(([(X_AUTH, token)], Json(UserResponse::from(&user))))
}

/// POST /users/login
///
/// Exchange email + password for a new session token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CredentialsRequest>,
) -> AppResult<WithSession> {
    let user = state
        .credentials
        .find_by_credentials(&input.email, &input.password)
        .await?;
    let token = state
        .credentials
        .add_session(&user, SessionKind::Auth)
        .await?;

    Ok(([(X_AUTH, token)], Json(UserResponse::from(&user))))
}

/// GET /users/me
pub async fn me(auth: AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&auth.user))
}

/// DELETE /users/me/token
///
/// Revoke the session used to make this request. Other sessions stay live.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    state
        .credentials
        .remove_session(&auth.user, &auth.token)
        .await?;
    Ok(StatusCode::OK)
}
