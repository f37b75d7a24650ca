use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use todo_core::error::CoreError;
use todo_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
/// Store and crypto failures never escape as 5xx: they are logged and
/// answered with a sanitized 400.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `todo_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store backend error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An operation failed for reasons the caller cannot act on.
    #[error("Operation failed: {0}")]
    Failure(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Generic message for failures whose details stay in the logs.
const FAILED_MESSAGE: &str = "The request could not be completed";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidCredentials => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_CREDENTIALS",
                    core.to_string(),
                ),
                CoreError::Unauthorized(reason) => {
                    // The caller learns nothing about why.
                    tracing::debug!(reason = %reason, "Rejecting unauthenticated request");
                    return StatusCode::UNAUTHORIZED.into_response();
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Failure(msg) => {
                tracing::error!(error = %msg, "Operation failed");
                (
                    StatusCode::BAD_REQUEST,
                    "REQUEST_FAILED",
                    FAILED_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Duplicate unique values map to a 400 validation error.
/// - Everything else maps to 400 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Duplicate(field) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("{field} is already in use"),
        ),
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::BAD_REQUEST,
                "REQUEST_FAILED",
                FAILED_MESSAGE.to_string(),
            )
        }
    }
}
