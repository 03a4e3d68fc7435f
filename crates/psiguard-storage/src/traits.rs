//! Store traits for the document store abstraction.
//!
//! This module defines the core trait that all store backends must implement.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageError;
use crate::types::StoredDocument;

/// The main trait that all document store backends must implement.
///
/// Documents are addressed by `(collection, id)`. Every write produces a new
/// version ID. Implementations must be thread-safe (`Send + Sync`) and must
/// provide per-document atomicity: a concurrent create/update/delete on the
/// same key resolves to one winner, never a torn document.
///
/// # Example
///
/// ```ignore
/// use psiguard_storage::{DocumentStore, StorageError, StoredDocument};
///
/// async fn load_user(store: &dyn DocumentStore, id: &str) -> Result<StoredDocument, StorageError> {
///     store
///         .get("users", id)
///         .await?
///         .ok_or_else(|| StorageError::not_found("users", id))
/// }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a new document in the given collection.
    ///
    /// When `id` is `None`, the backend assigns one. The document must be a
    /// JSON object; the backend injects `id` and `meta` fields into the
    /// stored form.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if a document with the same
    /// collection and ID exists.
    /// Returns `StorageError::InvalidDocument` if the document is malformed.
    async fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        document: &Value,
    ) -> Result<StoredDocument, StorageError>;

    /// Reads a document by collection and ID.
    ///
    /// Returns `None` if the document does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing
    /// documents.
    async fn get(&self, collection: &str, id: &str)
    -> Result<Option<StoredDocument>, StorageError>;

    /// Replaces an existing document.
    ///
    /// The stored document keeps its creation time and receives a fresh
    /// version ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the document does not exist.
    /// Returns `StorageError::InvalidDocument` if the document is malformed.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        document: &Value,
    ) -> Result<StoredDocument, StorageError>;

    /// Deletes a document by collection and ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the document does not exist.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StorageError>;

    /// Returns whether a document exists.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn exists(&self, collection: &str, id: &str) -> Result<bool, StorageError>;

    /// Returns the name of this store backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
