//! In-memory document store backend for PsiGuard.
//!
//! This crate provides an in-memory implementation of the `DocumentStore`
//! trait from `psiguard-storage`, using papaya lock-free HashMap for
//! concurrent access.
//!
//! # Example
//!
//! ```ignore
//! use psiguard_db_memory::InMemoryStore;
//! use psiguard_storage::DocumentStore;
//!
//! let store = InMemoryStore::new();
//!
//! // Create an appointment
//! let appointment = serde_json::json!({
//!     "psychologistId": "psy1",
//!     "patientId": "pat1"
//! });
//! let created = store.create("appointments", Some("appt1"), &appointment).await?;
//! ```

pub mod storage;
mod store_impl;

// Re-export the DocumentStore trait for convenience
pub use psiguard_storage::{DocumentStore, StorageError, StoredDocument};

pub use storage::{InMemoryStore, StorageKey};

/// Type alias for a shareable DocumentStore instance.
pub type DynDocumentStore = std::sync::Arc<dyn DocumentStore>;

/// Creates a new in-memory DocumentStore instance.
pub fn create_document_store() -> DynDocumentStore {
    std::sync::Arc::new(InMemoryStore::new())
}
