//! Request path classification.
//!
//! Incoming requests address a document as `collection/id`. Classification
//! splits the path, validates both segments, and resolves the collection name
//! to a [`ResourceKind`] before any rule runs. Unknown collections classify
//! successfully (as [`ResourceKind::Other`]) so that the rules can deny them;
//! only structurally malformed paths are rejected here.

use psiguard_core::{ResourceKind, validate_id};

use crate::error::AccessError;

// =============================================================================
// Document Path
// =============================================================================

/// A classified `collection/id` document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPath {
    /// Collection segment as it appeared in the request.
    pub collection: String,

    /// Document id segment.
    pub document_id: String,

    /// Resolved resource kind.
    pub kind: ResourceKind,
}

impl DocumentPath {
    /// Parse a request path into a classified document path.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidPath`] if the path is not exactly
    /// `collection/id` or either segment is invalid.
    pub fn parse(path: &str) -> Result<Self, AccessError> {
        let trimmed = path.trim_start_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();

        match segments.as_slice() {
            [collection, id] => {
                let kind = classify_collection(collection)?;
                validate_id(id).map_err(|e| AccessError::invalid_path(e.to_string()))?;
                Ok(Self {
                    collection: (*collection).to_string(),
                    document_id: (*id).to_string(),
                    kind,
                })
            }
            _ => Err(AccessError::invalid_path(format!(
                "expected collection/id, got '{path}'"
            ))),
        }
    }

    /// The `collection/id` storage key for this path.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}/{}", self.collection, self.document_id)
    }
}

// =============================================================================
// Collection Classification
// =============================================================================

/// Resolve a collection name to a [`ResourceKind`].
///
/// Unknown collection names resolve to [`ResourceKind::Other`]; the rules
/// deny those. Structurally invalid names (empty, or not a plain
/// alphanumeric identifier) are rejected.
///
/// # Errors
///
/// Returns [`AccessError::InvalidPath`] if the name is not a valid
/// collection identifier.
pub fn classify_collection(collection: &str) -> Result<ResourceKind, AccessError> {
    if collection.is_empty() {
        return Err(AccessError::invalid_path("empty collection name"));
    }
    if !collection
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(AccessError::invalid_path(format!(
            "invalid collection name '{collection}'"
        )));
    }
    Ok(ResourceKind::from_collection(collection))
}

// =============================================================================
// Tests
// =============================================================================
