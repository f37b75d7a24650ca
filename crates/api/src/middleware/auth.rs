//! Session-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderName;
use todo_core::error::CoreError;
use todo_db::models::user::User;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the session token, on requests and on register/login
/// responses.
pub const X_AUTH: HeaderName = HeaderName::from_static("x-auth");

/// Authenticated user extracted from the `x-auth` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication. Extraction runs before the handler body; on any failure
/// the request is answered with a bare 401.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> Json<UserResponse> {
///     tracing::info!(user_id = %auth.user.id, "handling request");
///     Json(UserResponse::from(&auth.user))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user owning the session.
    pub user: User,
    /// The exact token presented, needed to revoke this session.
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(&X_AUTH)
            .and_then(|v| v.to_str().ok())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-auth header".into()))
            })?;

        let user = state.credentials.find_by_session_token(token).await?;

        Ok(AuthUser {
            user,
            token: token.to_string(),
        })
    }
}
