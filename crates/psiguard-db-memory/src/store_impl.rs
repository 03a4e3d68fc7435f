//! Implementation of the DocumentStore trait for InMemoryStore.

use async_trait::async_trait;
use serde_json::Value;
use time::OffsetDateTime;

use psiguard_core::{DocumentEnvelope, Timestamp, generate_id, validate_id};
use psiguard_storage::{DocumentStore, StorageError, StoredDocument};

use crate::storage::{InMemoryStore, make_storage_key};

/// Checks that a document payload is a JSON object.
fn ensure_object(document: &Value) -> Result<&serde_json::Map<String, Value>, StorageError> {
    document
        .as_object()
        .ok_or_else(|| StorageError::invalid_document("Document must be a JSON object"))
}

/// Builds the stored envelope from a caller-supplied payload.
///
/// The caller's `id` and `meta` fields are discarded; the store owns both.
fn build_envelope(
    id: &str,
    version_id: &str,
    created_at: Option<Timestamp>,
    fields: &serde_json::Map<String, Value>,
) -> DocumentEnvelope {
    let mut envelope = DocumentEnvelope::new(id.to_string());
    envelope.meta.version_id = Some(version_id.to_string());
    envelope.meta.created_at = created_at;
    for (key, value) in fields {
        if key != "id" && key != "meta" {
            envelope.add_field(key.clone(), value.clone());
        }
    }
    envelope
}

fn envelope_to_stored(
    envelope: &DocumentEnvelope,
    collection: &str,
) -> Result<StoredDocument, StorageError> {
    let version_id = envelope
        .meta
        .version_id
        .clone()
        .unwrap_or_else(|| "1".to_string());
    let last_updated = envelope.meta.last_updated.0;
    let created_at = envelope
        .meta
        .created_at
        .as_ref()
        .map(|ts| ts.0)
        .unwrap_or(last_updated);
    let document =
        serde_json::to_value(envelope).map_err(|e| StorageError::internal(e.to_string()))?;

    Ok(StoredDocument {
        id: envelope.id.clone(),
        collection: collection.to_string(),
        version_id,
        document,
        last_updated,
        created_at,
    })
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        document: &Value,
    ) -> Result<StoredDocument, StorageError> {
        let fields = ensure_object(document)?;
        let id = match id {
            Some(id) => {
                validate_id(id).map_err(|e| StorageError::invalid_document(e.to_string()))?;
                id.to_string()
            }
            None => generate_id(),
        };

        let version_id = self.next_version();
        let now = Timestamp::new(OffsetDateTime::now_utc());
        let mut envelope = build_envelope(&id, &version_id, Some(now.clone()), fields);
        envelope.meta.last_updated = now;

        let key = make_storage_key(collection, &id);
        let guard = self.data.pin();

        if guard.get(&key).is_some() {
            return Err(StorageError::already_exists(collection, &id));
        }

        let stored = envelope_to_stored(&envelope, collection)?;
        guard.insert(key, envelope);
        Ok(stored)
    }

    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StorageError> {
        let key = make_storage_key(collection, id);
        let guard = self.data.pin();

        match guard.get(&key) {
            Some(envelope) => Ok(Some(envelope_to_stored(envelope, collection)?)),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        document: &Value,
    ) -> Result<StoredDocument, StorageError> {
        let fields = ensure_object(document)?;
        let version_id = self.next_version();
        let now = Timestamp::new(OffsetDateTime::now_utc());

        let key = make_storage_key(collection, id);
        let guard = self.data.pin();

        let existing = guard
            .get(&key)
            .ok_or_else(|| StorageError::not_found(collection, id))?;

        // Creation time survives replacement
        let created_at = existing.meta.created_at.clone();
        let mut envelope = build_envelope(id, &version_id, created_at, fields);
        envelope.meta.last_updated = now;

        let stored = envelope_to_stored(&envelope, collection)?;
        guard.insert(key, envelope);
        Ok(stored)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StorageError> {
        let key = make_storage_key(collection, id);
        let guard = self.data.pin();

        guard
            .remove(&key)
            .ok_or_else(|| StorageError::not_found(collection, id))?;

        Ok(())
    }

    async fn exists(&self, collection: &str, id: &str) -> Result<bool, StorageError> {
        let key = make_storage_key(collection, id);
        let guard = self.data.pin();
        Ok(guard.contains_key(&key))
    }

    fn backend_name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_include;
    use std::sync::Arc;

    /// Helper to use a store as a trait object to ensure we exercise
    /// DocumentStore methods
    fn as_document_store(store: &InMemoryStore) -> &dyn DocumentStore {
        store
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryStore::new();
        let docs = as_document_store(&store);

        let appointment = serde_json::json!({
            "psychologistId": "psy1",
            "patientId": "pat1"
        });

        let created = docs
            .create("appointments", Some("appt1"), &appointment)
            .await
            .unwrap();
        assert_eq!(created.id, "appt1");
        assert_eq!(created.collection, "appointments");
        assert!(!created.version_id.is_empty());

        let read = docs.get("appointments", "appt1").await.unwrap().unwrap();
        assert_eq!(read.id, "appt1");
        assert_eq!(read.version_id, created.version_id);
        assert_json_include!(
            actual: read.document,
            expected: serde_json::json!({
                "id": "appt1",
                "psychologistId": "psy1",
                "patientId": "pat1"
            })
        );
        assert!(read.document["meta"]["lastUpdated"].is_string());
    }

    #[tokio::test]
    async fn test_create_generates_id_when_absent() {
        let store = InMemoryStore::new();
        let docs = as_document_store(&store);

        let created = docs
            .create("auditLogs", None, &serde_json::json!({"action": "login"}))
            .await
            .unwrap();
        assert!(!created.id.is_empty());

        let read = docs.get("auditLogs", &created.id).await.unwrap();
        assert!(read.is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_non_object() {
        let store = InMemoryStore::new();
        let docs = as_document_store(&store);

        let result = docs
            .create("patients", Some("p1"), &serde_json::json!("just a string"))
            .await;
        assert!(result.unwrap_err().is_invalid_document());
    }

    #[tokio::test]
    async fn test_create_rejects_slash_in_id() {
        let store = InMemoryStore::new();
        let docs = as_document_store(&store);

        let result = docs
            .create("patients", Some("p/1"), &serde_json::json!({}))
            .await;
        assert!(result.unwrap_err().is_invalid_document());
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let store = InMemoryStore::new();
        let docs = as_document_store(&store);

        let doc = serde_json::json!({"name": "A"});
        docs.create("patients", Some("p1"), &doc).await.unwrap();

        let result = docs.create("patients", Some("p1"), &doc).await;
        assert!(result.unwrap_err().is_already_exists());
    }

    #[tokio::test]
    async fn test_update_bumps_version_and_keeps_created_at() {
        let store = InMemoryStore::new();
        let docs = as_document_store(&store);

        let created = docs
            .create("patients", Some("p1"), &serde_json::json!({"name": "A"}))
            .await
            .unwrap();

        let updated = docs
            .update("patients", "p1", &serde_json::json!({"name": "B"}))
            .await
            .unwrap();

        assert_eq!(updated.id, "p1");
        assert_ne!(updated.version_id, created.version_id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.last_updated >= created.last_updated);
        assert_eq!(updated.field("name"), Some(&serde_json::json!("B")));
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let store = InMemoryStore::new();
        let docs = as_document_store(&store);

        let result = docs
            .update("patients", "ghost", &serde_json::json!({"name": "B"}))
            .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryStore::new();
        let docs = as_document_store(&store);

        docs.create("chats", Some("c1"), &serde_json::json!({}))
            .await
            .unwrap();
        docs.delete("chats", "c1").await.unwrap();

        assert!(docs.get("chats", "c1").await.unwrap().is_none());

        let again = docs.delete("chats", "c1").await;
        assert!(again.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_exists() {
        let store = InMemoryStore::new();
        let docs = as_document_store(&store);

        assert!(!docs.exists("users", "u1").await.unwrap());
        docs.create("users", Some("u1"), &serde_json::json!({"role": "psychologist"}))
            .await
            .unwrap();
        assert!(docs.exists("users", "u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = InMemoryStore::new();
        let docs = as_document_store(&store);

        docs.create("patients", Some("shared"), &serde_json::json!({"a": 1}))
            .await
            .unwrap();
        docs.create("users", Some("shared"), &serde_json::json!({"b": 2}))
            .await
            .unwrap();

        assert_eq!(store.count(), 2);
        assert_eq!(store.count_by_collection("patients"), 1);
        assert_eq!(store.count_by_collection("users"), 1);

        docs.delete("patients", "shared").await.unwrap();
        assert!(docs.exists("users", "shared").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_creates() {
        let store = Arc::new(InMemoryStore::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .create(
                        "auditLogs",
                        Some(&format!("log{i}")),
                        &serde_json::json!({"action": "login"}),
                    )
                    .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.count_by_collection("auditLogs"), 16);
    }

    #[tokio::test]
    async fn test_backend_name() {
        let store = InMemoryStore::new();
        assert_eq!(store.backend_name(), "in-memory");
    }
}
