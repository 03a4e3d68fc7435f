//! Policy-enforced document operations.
//!
//! [`PolicyGuard`] is the enforcement point in front of a
//! [`DocumentStore`](psiguard_storage::DocumentStore). Each operation
//! classifies the target, gathers the inputs the rules need (the stored
//! document, and for chats the existence of every referenced participant),
//! evaluates the rule set, and only then touches the store.
//!
//! Every denial surfaces as the same [`AccessError::PermissionDenied`] with a
//! configurable uniform message. The failed rule is logged, not returned, so
//! a caller probing for documents cannot distinguish "absent" from "not
//! yours".
//!
//! ```ignore
//! use psiguard_access::PolicyGuard;
//! use psiguard_db_memory::create_document_store;
//!
//! let guard = PolicyGuard::new(create_document_store());
//! let stored = guard.create(&principal, "appointments", None, &document).await?;
//! let loaded = guard.read(&principal, "appointments/a1").await?;
//! ```

use psiguard_core::{Operation, ResourceKind, validate_id};
use psiguard_storage::{DynDocumentStore, StoredDocument};
use serde_json::Value;

use crate::config::AccessConfig;
use crate::error::AccessError;
use crate::identity::Principal;
use crate::policy::context::{PolicyContext, PolicyContextBuilder};
use crate::policy::engine::{AccessDecision, PolicyEvaluator, PolicyEvaluatorConfig};
use crate::policy::resource::{DocumentPath, classify_collection};

/// Access-controlled facade over a document store.
pub struct PolicyGuard {
    store: DynDocumentStore,
    evaluator: PolicyEvaluator,
    deny_message: String,
}

impl PolicyGuard {
    /// Create a guard with the default configuration.
    #[must_use]
    pub fn new(store: DynDocumentStore) -> Self {
        Self::with_config(store, AccessConfig::default())
    }

    /// Create a guard with the given configuration.
    #[must_use]
    pub fn with_config(store: DynDocumentStore, config: AccessConfig) -> Self {
        Self {
            store,
            evaluator: PolicyEvaluator::new(PolicyEvaluatorConfig {
                log_decisions: config.log_decisions,
            }),
            deny_message: config.deny_message,
        }
    }

    /// Create a document in `collection`, subject to the rules.
    ///
    /// When `id` is `None` the store assigns one. For collections whose
    /// creation rule compares the document id against the caller, a
    /// server-assigned id can never match.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::PermissionDenied`] if the rules refuse the
    /// operation, [`AccessError::InvalidPath`] if the collection name or id
    /// is invalid, or [`AccessError::Storage`] if the store fails.
    pub async fn create(
        &self,
        principal: &Principal,
        collection: &str,
        id: Option<&str>,
        document: &Value,
    ) -> Result<StoredDocument, AccessError> {
        let kind = classify_collection(collection)?;
        if let Some(id) = id {
            validate_id(id).map_err(|e| AccessError::invalid_path(e.to_string()))?;
        }

        let mut builder = PolicyContextBuilder::new()
            .with_principal(principal.clone())
            .with_operation(Operation::Create)
            .with_collection(kind.clone(), collection, id)
            .with_incoming(document.clone());

        // Chats reference users by id; resolve them before the rules run.
        if kind == ResourceKind::Chat {
            for (user_id, exists) in self.participant_flags(document).await? {
                builder = builder.with_participant(user_id, exists);
            }
        }

        let context = self.build_context(builder)?;
        self.enforce(&context)?;
        Ok(self.store.create(collection, id, document).await?)
    }

    /// Read the document at `path` (`collection/id`), subject to the rules.
    ///
    /// Returns `Ok(None)` only when the caller was allowed without consulting
    /// the document and it does not exist. Rules that gate on document
    /// content deny a miss instead of revealing it.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::PermissionDenied`] if the rules refuse the
    /// operation, [`AccessError::InvalidPath`] if the path is malformed, or
    /// [`AccessError::Storage`] if the store fails.
    pub async fn read(
        &self,
        principal: &Principal,
        path: &str,
    ) -> Result<Option<StoredDocument>, AccessError> {
        let target = DocumentPath::parse(path)?;
        let existing = self
            .store
            .get(&target.collection, &target.document_id)
            .await?;

        let mut builder = PolicyContextBuilder::new()
            .with_principal(principal.clone())
            .with_operation(Operation::Read)
            .with_path(&target);
        if let Some(stored) = &existing {
            builder = builder.with_existing(stored.document.clone());
        }

        let context = self.build_context(builder)?;
        self.enforce(&context)?;
        Ok(existing)
    }

    /// Replace the document at `path`, subject to the rules.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::PermissionDenied`] if the rules refuse the
    /// operation, [`AccessError::InvalidPath`] if the path is malformed, or
    /// [`AccessError::Storage`] if the store fails or the document does not
    /// exist for a caller whose access does not depend on it.
    pub async fn update(
        &self,
        principal: &Principal,
        path: &str,
        document: &Value,
    ) -> Result<StoredDocument, AccessError> {
        let target = DocumentPath::parse(path)?;
        let existing = self
            .store
            .get(&target.collection, &target.document_id)
            .await?;

        let mut builder = PolicyContextBuilder::new()
            .with_principal(principal.clone())
            .with_operation(Operation::Update)
            .with_path(&target)
            .with_incoming(document.clone());
        if let Some(stored) = &existing {
            builder = builder.with_existing(stored.document.clone());
        }

        let context = self.build_context(builder)?;
        self.enforce(&context)?;
        Ok(self
            .store
            .update(&target.collection, &target.document_id, document)
            .await?)
    }

    /// Delete the document at `path`, subject to the rules.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::PermissionDenied`] if the rules refuse the
    /// operation, [`AccessError::InvalidPath`] if the path is malformed, or
    /// [`AccessError::Storage`] if the store fails or the document does not
    /// exist for a caller whose access does not depend on it.
    pub async fn delete(&self, principal: &Principal, path: &str) -> Result<(), AccessError> {
        let target = DocumentPath::parse(path)?;
        let existing = self
            .store
            .get(&target.collection, &target.document_id)
            .await?;

        let mut builder = PolicyContextBuilder::new()
            .with_principal(principal.clone())
            .with_operation(Operation::Delete)
            .with_path(&target);
        if let Some(stored) = &existing {
            builder = builder.with_existing(stored.document.clone());
        }

        let context = self.build_context(builder)?;
        self.enforce(&context)?;
        self.store
            .delete(&target.collection, &target.document_id)
            .await?;
        Ok(())
    }

    /// Resolve every key of the incoming `participants` map against the
    /// `users` collection.
    async fn participant_flags(
        &self,
        document: &Value,
    ) -> Result<Vec<(String, bool)>, AccessError> {
        let users = ResourceKind::User;
        let mut flags = Vec::new();
        if let Some(participants) = document.get("participants").and_then(Value::as_object) {
            for user_id in participants.keys() {
                let exists = self.store.exists(users.collection(), user_id).await?;
                flags.push((user_id.clone(), exists));
            }
        }
        Ok(flags)
    }

    fn build_context(&self, builder: PolicyContextBuilder) -> Result<PolicyContext, AccessError> {
        builder
            .build()
            .map_err(|e| AccessError::internal(e.to_string()))
    }

    fn enforce(&self, context: &PolicyContext) -> Result<(), AccessError> {
        match self.evaluator.evaluate(context) {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(_) => {
                Err(AccessError::permission_denied(self.deny_message.as_str()))
            }
        }
    }
}
