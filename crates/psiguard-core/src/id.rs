use crate::error::{CoreError, Result};

/// Maximum accepted document ID length, in bytes.
pub const MAX_ID_LENGTH: usize = 512;

/// Generates a fresh document ID.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Validates a document ID.
///
/// IDs are embedded in `collection/id` storage keys, so a `/` would make
/// the key ambiguous. Whitespace-only and oversized IDs are rejected too.
pub fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(CoreError::invalid_id("ID must not be empty"));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(CoreError::invalid_id(format!(
            "ID exceeds {MAX_ID_LENGTH} bytes"
        )));
    }
    if id.contains('/') {
        return Err(CoreError::invalid_id(format!("ID must not contain '/': {id}")));
    }
    if id.chars().any(char::is_control) {
        return Err(CoreError::invalid_id("ID must not contain control characters"));
    }
    Ok(())
}
