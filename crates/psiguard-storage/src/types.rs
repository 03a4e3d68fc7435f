//! Store types for the document store abstraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// A document as returned by a store backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// The document ID.
    pub id: String,
    /// The collection this document lives under.
    pub collection: String,
    /// The version ID of this specific version.
    pub version_id: String,
    /// The full document content as JSON, including injected `id`/`meta`.
    pub document: Value,
    /// When this version was last updated.
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
    /// When the document was originally created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl StoredDocument {
    /// Creates a new `StoredDocument` stamped with the current time.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        collection: impl Into<String>,
        version_id: impl Into<String>,
        document: Value,
    ) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: id.into(),
            collection: collection.into(),
            version_id: version_id.into(),
            document,
            last_updated: now,
            created_at: now,
        }
    }

    /// Creates a new version of this document with updated content.
    #[must_use]
    pub fn new_version(&self, version_id: impl Into<String>, document: Value) -> Self {
        Self {
            id: self.id.clone(),
            collection: self.collection.clone(),
            version_id: version_id.into(),
            document,
            last_updated: OffsetDateTime::now_utc(),
            created_at: self.created_at,
        }
    }

    /// Looks up a top-level field on the document content.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stored_document_new() {
        let doc = StoredDocument::new(
            "appt1",
            "appointments",
            "1",
            json!({"psychologistId": "psy1", "patientId": "pat1"}),
        );

        assert_eq!(doc.id, "appt1");
        assert_eq!(doc.collection, "appointments");
        assert_eq!(doc.version_id, "1");
        assert_eq!(doc.field("psychologistId"), Some(&json!("psy1")));
        assert_eq!(doc.last_updated, doc.created_at);
    }

    #[test]
    fn test_new_version_preserves_identity() {
        let original = StoredDocument::new("p1", "patients", "1", json!({"name": "A"}));
        let updated = original.new_version("2", json!({"name": "B"}));

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.collection, original.collection);
        assert_eq!(updated.version_id, "2");
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.field("name"), Some(&json!("B")));
    }

    #[test]
    fn test_field_on_missing_key() {
        let doc = StoredDocument::new("log1", "auditLogs", "1", json!({"action": "login"}));
        assert!(doc.field("actor").is_none());
    }

    #[test]
    fn test_serialization_uses_rfc3339_timestamps() {
        let doc = StoredDocument::new("p1", "patients", "1", json!({}));
        let value = serde_json::to_value(&doc).unwrap();

        let last_updated = value["last_updated"].as_str().unwrap();
        assert!(last_updated.contains('T'));
        let parsed = OffsetDateTime::parse(
            last_updated,
            &time::format_description::well_known::Rfc3339,
        );
        assert!(parsed.is_ok());
    }
}
