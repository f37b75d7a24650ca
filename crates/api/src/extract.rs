//! Request body extraction with rejections mapped onto [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] as an extractor.
///
/// A missing body, wrong content type, malformed JSON or missing field all
/// become a 400 in the standard error envelope instead of axum's defaults
/// (415/422).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
