use uuid::Uuid;

/// All primary keys are time-ordered UUIDs (v7).
pub type DbId = Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a fresh primary key.
pub fn new_id() -> DbId {
    Uuid::now_v7()
}

/// Parse a raw path segment into a [`DbId`].
///
/// Returns `None` for anything that is not a well-formed UUID, so callers can
/// answer "not found" without consulting the store.
pub fn parse_id(raw: &str) -> Option<DbId> {
    Uuid::parse_str(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_generated_ids() {
        let id = new_id();
        assert_eq!(parse_id(&id.to_string()), Some(id));
    }

    #[test]
    fn parse_id_rejects_short_numeric_ids() {
        assert_eq!(parse_id("123"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("not-a-uuid-at-all"), None);
    }

    #[test]
    fn new_ids_are_distinct() {
        assert_ne!(new_id(), new_id());
    }
}
