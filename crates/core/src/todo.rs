//! Todo field rules and the completion state transition applied on update.

use crate::error::CoreError;

/// Trim the todo text and require at least one remaining character.
pub fn normalize_text(raw: &str) -> Result<String, CoreError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(CoreError::Validation("Todo text must not be empty".into()));
    }
    Ok(text.to_string())
}

/// Completion fields written together on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub completed: bool,
    /// Epoch milliseconds at which the todo was marked completed.
    pub completed_at: Option<i64>,
}

/// Resolve the completion fields for an update.
///
/// Only an explicit `Some(true)` marks the todo completed and stamps
/// `completed_at`; anything else (including omitting the field) resets it.
pub fn resolve_completion(requested: Option<bool>, now_millis: i64) -> Completion {
    match requested {
        Some(true) => Completion {
            completed: true,
            completed_at: Some(now_millis),
        },
        _ => Completion {
            completed: false,
            completed_at: None,
        },
    }
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
