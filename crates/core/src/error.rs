#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Login failed. Deliberately silent about whether the account exists.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
