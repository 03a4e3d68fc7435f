//! Policy evaluation context for access control decisions.
//!
//! This module provides the context structure that carries everything a rule
//! may consult: the caller, the operation, the classified target, the
//! incoming document (for create/update), the stored document (for
//! read/update/delete), and pre-fetched participant existence flags. The
//! evaluator itself never touches storage; whoever builds the context is
//! responsible for fetching these inputs first.
//!
//! # Usage
//!
//! ```ignore
//! use psiguard_access::policy::context::PolicyContextBuilder;
//!
//! let context = PolicyContextBuilder::new()
//!     .with_principal(principal)
//!     .with_operation(Operation::Update)
//!     .with_path(&path)
//!     .with_incoming(body)
//!     .with_existing(stored.document.clone())
//!     .build()?;
//! ```

use std::collections::HashMap;

use psiguard_core::{Operation, ResourceKind};
use serde::Serialize;
use serde_json::Value;

use crate::identity::Principal;
use crate::policy::resource::DocumentPath;

// =============================================================================
// Policy Context
// =============================================================================

/// Complete context for evaluating one operation against one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyContext {
    /// The caller.
    pub principal: Principal,

    /// The requested operation.
    pub operation: Operation,

    /// Resolved kind of the target collection.
    pub kind: ResourceKind,

    /// Collection segment as it appeared in the request.
    pub collection: String,

    /// Target document id. `None` for creates with a server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Request body for create/update operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming: Option<Value>,

    /// Stored document for read/update/delete operations. `None` when the
    /// document does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing: Option<Value>,

    /// Pre-fetched existence flags, keyed by user id. Populated for rules
    /// that require referenced users to exist.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub participants: HashMap<String, bool>,
}

impl PolicyContext {
    /// Returns a string field from the incoming document, if present.
    #[must_use]
    pub fn incoming_str(&self, field: &str) -> Option<&str> {
        self.incoming
            .as_ref()
            .and_then(|doc| doc.get(field))
            .and_then(Value::as_str)
    }

    /// Returns a string field from the stored document, if present.
    #[must_use]
    pub fn existing_str(&self, field: &str) -> Option<&str> {
        self.existing
            .as_ref()
            .and_then(|doc| doc.get(field))
            .and_then(Value::as_str)
    }

    /// Returns the `participants` map of the incoming document, if it is an
    /// object.
    #[must_use]
    pub fn incoming_participants(&self) -> Option<&serde_json::Map<String, Value>> {
        self.incoming
            .as_ref()
            .and_then(|doc| doc.get("participants"))
            .and_then(Value::as_object)
    }

    /// Returns `true` if the stored document's `participants` map contains
    /// the given user id as a key.
    #[must_use]
    pub fn existing_has_participant(&self, user_id: &str) -> bool {
        self.existing
            .as_ref()
            .and_then(|doc| doc.get("participants"))
            .and_then(Value::as_object)
            .is_some_and(|participants| participants.contains_key(user_id))
    }

    /// Returns `true` if the given user id was pre-fetched and exists.
    ///
    /// Ids that were never fetched count as nonexistent.
    #[must_use]
    pub fn participant_exists(&self, user_id: &str) -> bool {
        self.participants.get(user_id).copied().unwrap_or(false)
    }
}

// =============================================================================
// Policy Context Builder
// =============================================================================

/// Builder for constructing a [`PolicyContext`].
///
/// The builder validates that all required fields are provided before
/// constructing the final context.
#[derive(Debug, Default)]
pub struct PolicyContextBuilder {
    principal: Option<Principal>,
    operation: Option<Operation>,
    kind: Option<ResourceKind>,
    collection: Option<String>,
    document_id: Option<String>,
    incoming: Option<Value>,
    existing: Option<Value>,
    participants: HashMap<String, bool>,
}

impl PolicyContextBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caller.
    #[must_use]
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Set the requested operation.
    #[must_use]
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Set the target from a classified document path.
    #[must_use]
    pub fn with_path(mut self, path: &DocumentPath) -> Self {
        self.kind = Some(path.kind.clone());
        self.collection = Some(path.collection.clone());
        self.document_id = Some(path.document_id.clone());
        self
    }

    /// Set the target from a collection and an optional document id.
    ///
    /// Used for creates, where the id may be server-assigned.
    #[must_use]
    pub fn with_collection(
        mut self,
        kind: ResourceKind,
        collection: impl Into<String>,
        document_id: Option<&str>,
    ) -> Self {
        self.kind = Some(kind);
        self.collection = Some(collection.into());
        self.document_id = document_id.map(String::from);
        self
    }

    /// Set the request body.
    #[must_use]
    pub fn with_incoming(mut self, document: Value) -> Self {
        self.incoming = Some(document);
        self
    }

    /// Set the stored document.
    #[must_use]
    pub fn with_existing(mut self, document: Value) -> Self {
        self.existing = Some(document);
        self
    }

    /// Record whether a referenced user exists.
    #[must_use]
    pub fn with_participant(mut self, user_id: impl Into<String>, exists: bool) -> Self {
        self.participants.insert(user_id.into(), exists);
        self
    }

    /// Build the [`PolicyContext`].
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<PolicyContext, ContextError> {
        Ok(PolicyContext {
            principal: self.principal.ok_or(ContextError::MissingPrincipal)?,
            operation: self.operation.ok_or(ContextError::MissingOperation)?,
            kind: self.kind.ok_or(ContextError::MissingTarget)?,
            collection: self.collection.ok_or(ContextError::MissingTarget)?,
            document_id: self.document_id,
            incoming: self.incoming,
            existing: self.existing,
            participants: self.participants,
        })
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors that can occur when building a [`PolicyContext`].
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum ContextError {
    /// Principal not provided.
    #[error("Missing principal")]
    MissingPrincipal,

    /// Operation not provided.
    #[error("Missing operation")]
    MissingOperation,

    /// Target collection not provided.
    #[error("Missing target collection")]
    MissingTarget,
}

// =============================================================================
// Tests
// =============================================================================
