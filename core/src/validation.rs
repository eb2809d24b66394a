//! Individual validation rules shared by the payload model and the server's
//! path and query extraction.

use uuid::Uuid;

use crate::error::ValidationError;
use crate::types::Status;

/// Parse a todo id. Hyphenated, simple, braced and `urn:uuid:` forms are
/// accepted.
pub fn parse_todo_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidId)
}

/// Text must be present and non-empty. Whitespace counts as content.
pub fn require_text(text: Option<&str>) -> Result<&str, ValidationError> {
    match text {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(ValidationError::EmptyText),
    }
}

/// Interpret the `status` query parameter. An absent or empty value means
/// "no status filter".
pub fn parse_status_param(raw: Option<&str>) -> Result<Option<Status>, ValidationError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::InvalidStatusParameter),
    }
}
