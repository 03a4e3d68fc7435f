//! # psiguard-storage
//!
//! Document store abstraction for the PsiGuard access control stack.
//!
//! This crate defines the traits and types that all store backends must
//! implement. It does not contain any implementations - those are provided
//! by separate crates.
//!
//! ## Overview
//!
//! The main trait is [`DocumentStore`], which defines the contract for
//! CRUD operations on documents addressed by `(collection, id)`.
//!
//! ## Example
//!
//! ```ignore
//! use psiguard_storage::{DocumentStore, StorageError, StoredDocument};
//!
//! async fn load_appointment(
//!     store: &dyn DocumentStore,
//!     id: &str,
//! ) -> Result<StoredDocument, StorageError> {
//!     store
//!         .get("appointments", id)
//!         .await?
//!         .ok_or_else(|| StorageError::not_found("appointments", id))
//! }
//! ```
//!
//! ## Store Backends
//!
//! To implement a store backend, implement the [`DocumentStore`] trait:
//!
//! ```ignore
//! use async_trait::async_trait;
//! use psiguard_storage::{DocumentStore, StorageError, StoredDocument};
//!
//! struct MyStore {
//!     // ...
//! }
//!
//! #[async_trait]
//! impl DocumentStore for MyStore {
//!     async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StorageError> {
//!         // Implementation
//!     }
//!     // ... other methods
//! }
//! ```

mod error;
mod traits;
mod types;

// Re-export everything from submodules
pub use error::{ErrorCategory, StorageError};
pub use traits::DocumentStore;
pub use types::StoredDocument;

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shared store trait object.
pub type DynDocumentStore = std::sync::Arc<dyn DocumentStore>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use psiguard_storage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ErrorCategory, StorageError};
    pub use crate::traits::DocumentStore;
    pub use crate::types::StoredDocument;
    pub use crate::{DynDocumentStore, StorageResult};
}
