//! Account field rules: email normalization and validation, password policy.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Shortest plaintext password accepted at registration, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Canonical form used for storage and lookup: trimmed and lower-cased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check that an already-normalized email is a well-formed address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".into()));
    }
    if !email.validate_email() || !has_routable_domain(email) {
        return Err(CoreError::Validation(format!(
            "{email} is not a valid email"
        )));
    }
    Ok(())
}

/// Require a dotted host name: no bare hosts (`localhost`) and no `[...]`
/// address literals.
fn has_routable_domain(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    !domain.starts_with('[')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Enforce the minimum password length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
