//! Rule evaluation engine for access control decisions.
//!
//! The evaluator maps a [`PolicyContext`] to an [`AccessDecision`] using a
//! fixed rule set per collection. Evaluation is a pure function of the
//! context: it performs no I/O, never fails, and returns the same decision
//! for the same context every time. Missing fields, absent documents, and
//! unknown collections all evaluate to a deny, never to an error.
//!
//! Unauthenticated callers are denied before any collection rule runs. There
//! is no blanket admin override; admins are allowed exactly where a rule
//! names them, so append-only collections refuse reads and rewrites even to
//! admins.
//!
//! ```ignore
//! use psiguard_access::policy::engine::PolicyEvaluator;
//!
//! let evaluator = PolicyEvaluator::default();
//! let decision = evaluator.evaluate(&context);
//! if let Some(reason) = decision.deny_reason() {
//!     // reason.code names the failed rule; callers see a uniform message
//! }
//! ```

use psiguard_core::{Operation, ResourceKind, Role};
use serde::Serialize;
use serde_json::json;

use crate::policy::context::PolicyContext;

// =============================================================================
// Access Decision
// =============================================================================

/// The outcome of evaluating one operation against the rule set.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    /// Access is granted.
    Allow,
    /// Access is refused, with the rule that failed.
    Deny(DenyReason),
}

impl AccessDecision {
    /// Returns `true` if access is granted.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns `true` if access is refused.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny(_))
    }

    /// Returns the denial reason, if access was refused.
    #[must_use]
    pub fn deny_reason(&self) -> Option<&DenyReason> {
        match self {
            Self::Allow => None,
            Self::Deny(reason) => Some(reason),
        }
    }
}

// =============================================================================
// Deny Reason
// =============================================================================

/// Why access was refused.
///
/// The code and details identify the failed rule for logs and audits. They
/// must not be returned to callers; the guard surfaces a uniform message
/// instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DenyReason {
    /// Machine-readable code identifying the failed rule.
    pub code: String,

    /// Human-readable explanation for logs.
    pub message: String,

    /// Additional structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DenyReason {
    /// The caller is not authenticated.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self {
            code: "unauthenticated".to_string(),
            message: "Caller is not authenticated".to_string(),
            details: None,
        }
    }

    /// The caller's role does not permit the operation.
    #[must_use]
    pub fn role_not_permitted(kind: &ResourceKind, operation: Operation) -> Self {
        Self {
            code: "role-not-permitted".to_string(),
            message: format!("Role does not permit {operation} on {kind}"),
            details: Some(json!({
                "kind": kind,
                "operation": operation,
            })),
        }
    }

    /// The caller does not own the target document.
    #[must_use]
    pub fn not_owner(kind: &ResourceKind, operation: Operation) -> Self {
        Self {
            code: "not-owner".to_string(),
            message: format!("Caller does not own the {kind} targeted by {operation}"),
            details: None,
        }
    }

    /// The caller is not a participant of the target document.
    #[must_use]
    pub fn not_participant(kind: &ResourceKind) -> Self {
        Self {
            code: "not-participant".to_string(),
            message: format!("Caller is not a participant of the target {kind}"),
            details: None,
        }
    }

    /// Documents in this collection cannot be rewritten once created.
    #[must_use]
    pub fn append_only(kind: &ResourceKind) -> Self {
        Self {
            code: "append-only".to_string(),
            message: format!("{kind} documents cannot be modified"),
            details: None,
        }
    }

    /// No caller may perform this operation on this collection.
    #[must_use]
    pub fn operation_not_permitted(kind: &ResourceKind, operation: Operation) -> Self {
        Self {
            code: "operation-not-permitted".to_string(),
            message: format!("{operation} is not permitted on {kind} documents"),
            details: None,
        }
    }

    /// A referenced participant does not resolve to an existing user.
    #[must_use]
    pub fn unknown_participant(user_id: &str) -> Self {
        Self {
            code: "unknown-participant".to_string(),
            message: "Referenced participant does not exist".to_string(),
            details: Some(json!({ "participant": user_id })),
        }
    }

    /// The incoming document lacks a participants map.
    #[must_use]
    pub fn participants_required() -> Self {
        Self {
            code: "participants-required".to_string(),
            message: "Document requires a participants map".to_string(),
            details: None,
        }
    }

    /// No rules are defined for the target collection.
    #[must_use]
    pub fn unknown_collection(collection: &str) -> Self {
        Self {
            code: "unknown-collection".to_string(),
            message: "No rules are defined for this collection".to_string(),
            details: Some(json!({ "collection": collection })),
        }
    }
}

// =============================================================================
// Evaluator Configuration
// =============================================================================

/// Configuration for the policy evaluator.
#[derive(Debug, Clone)]
pub struct PolicyEvaluatorConfig {
    /// Log decisions (allows at trace level, denies at debug level).
    pub log_decisions: bool,
}

impl Default for PolicyEvaluatorConfig {
    fn default() -> Self {
        Self {
            log_decisions: true,
        }
    }
}

// =============================================================================
// Policy Evaluator
// =============================================================================

/// Evaluates access control rules against a [`PolicyContext`].
#[derive(Debug, Clone, Default)]
pub struct PolicyEvaluator {
    config: PolicyEvaluatorConfig,
}

impl PolicyEvaluator {
    /// Create a new evaluator with the given configuration.
    #[must_use]
    pub fn new(config: PolicyEvaluatorConfig) -> Self {
        Self { config }
    }

    /// Evaluate the rules for one operation.
    ///
    /// This is a total function: every context produces either
    /// [`AccessDecision::Allow`] or [`AccessDecision::Deny`].
    #[must_use]
    pub fn evaluate(&self, context: &PolicyContext) -> AccessDecision {
        let decision = decide(context);

        if self.config.log_decisions {
            match &decision {
                AccessDecision::Allow => {
                    tracing::trace!(
                        principal = %context.principal.id,
                        collection = %context.collection,
                        operation = %context.operation,
                        "access allowed"
                    );
                }
                AccessDecision::Deny(reason) => {
                    tracing::debug!(
                        principal = %context.principal.id,
                        collection = %context.collection,
                        operation = %context.operation,
                        code = %reason.code,
                        "access denied"
                    );
                }
            }
        }

        decision
    }
}

// =============================================================================
// Rules
// =============================================================================

fn decide(context: &PolicyContext) -> AccessDecision {
    // Anonymous callers are refused before any collection rule runs.
    if !context.principal.authenticated {
        return AccessDecision::Deny(DenyReason::unauthenticated());
    }

    match &context.kind {
        ResourceKind::Patient => decide_patient(context),
        ResourceKind::Appointment => decide_appointment(context),
        ResourceKind::Chat => decide_chat(context),
        ResourceKind::User => decide_user(context),
        ResourceKind::Assessment => decide_assessment(context),
        // Audit logs and feedback share append-only semantics.
        ResourceKind::AuditLog | ResourceKind::Feedback => decide_append_only(context),
        ResourceKind::Other(name) => AccessDecision::Deny(DenyReason::unknown_collection(name)),
    }
}

/// Patient records are gated purely by role; no ownership applies.
fn decide_patient(context: &PolicyContext) -> AccessDecision {
    let principal = &context.principal;
    let allowed = match context.operation {
        Operation::Read => {
            principal.has_role(Role::Psychologist)
                || principal.has_role(Role::Admin)
                || principal.has_role(Role::Secretary)
        }
        Operation::Create | Operation::Update | Operation::Delete => {
            principal.has_role(Role::Psychologist) || principal.has_role(Role::Admin)
        }
    };

    if allowed {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny(DenyReason::role_not_permitted(
            &context.kind,
            context.operation,
        ))
    }
}

/// Appointments belong to the psychologist named on the document. The named
/// patient may read but not modify. Creation requires no role, only that the
/// caller is the psychologist the incoming document names.
fn decide_appointment(context: &PolicyContext) -> AccessDecision {
    if context.principal.is_admin() {
        return AccessDecision::Allow;
    }
    let caller = context.principal.id.as_str();

    match context.operation {
        Operation::Create => {
            if context.incoming_str("psychologistId") == Some(caller) {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenyReason::not_owner(&context.kind, context.operation))
            }
        }
        Operation::Read => {
            if context.existing_str("psychologistId") == Some(caller)
                || context.existing_str("patientId") == Some(caller)
            {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenyReason::not_participant(&context.kind))
            }
        }
        Operation::Update | Operation::Delete => {
            if context.existing_str("psychologistId") == Some(caller) {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenyReason::not_owner(&context.kind, context.operation))
            }
        }
    }
}

/// Chats may be created by any authenticated caller provided every key of
/// the incoming participants map resolves to an existing user. Only
/// participants may read; nobody rewrites or deletes, admins included.
fn decide_chat(context: &PolicyContext) -> AccessDecision {
    match context.operation {
        Operation::Create => {
            let Some(participants) = context.incoming_participants() else {
                return AccessDecision::Deny(DenyReason::participants_required());
            };
            // Every key must resolve; an empty map has nothing to resolve.
            for user_id in participants.keys() {
                if !context.participant_exists(user_id) {
                    return AccessDecision::Deny(DenyReason::unknown_participant(user_id));
                }
            }
            AccessDecision::Allow
        }
        Operation::Read => {
            if context.existing_has_participant(&context.principal.id) {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenyReason::not_participant(&context.kind))
            }
        }
        Operation::Update | Operation::Delete => {
            AccessDecision::Deny(DenyReason::append_only(&context.kind))
        }
    }
}

/// User documents may be managed by their owner (the caller whose id equals
/// the target document id) or an admin. Deletion is admin-only.
fn decide_user(context: &PolicyContext) -> AccessDecision {
    if context.principal.is_admin() {
        return AccessDecision::Allow;
    }

    match context.operation {
        Operation::Create | Operation::Read | Operation::Update => {
            let is_self = context
                .document_id
                .as_deref()
                .is_some_and(|id| context.principal.is_self(id));
            if is_self {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenyReason::not_owner(&context.kind, context.operation))
            }
        }
        Operation::Delete => AccessDecision::Deny(DenyReason::role_not_permitted(
            &context.kind,
            context.operation,
        )),
    }
}

/// Assessments are created by the psychologist the document names as
/// assigner. The assignee may read; only the assigner rewrites or deletes.
fn decide_assessment(context: &PolicyContext) -> AccessDecision {
    if context.principal.is_admin() {
        return AccessDecision::Allow;
    }
    let caller = context.principal.id.as_str();

    match context.operation {
        Operation::Create => {
            if !context.principal.has_role(Role::Psychologist) {
                return AccessDecision::Deny(DenyReason::role_not_permitted(
                    &context.kind,
                    context.operation,
                ));
            }
            if context.incoming_str("assignedBy") == Some(caller) {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenyReason::not_owner(&context.kind, context.operation))
            }
        }
        Operation::Read => {
            if context.existing_str("assignedBy") == Some(caller)
                || context.existing_str("assignedTo") == Some(caller)
            {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenyReason::not_participant(&context.kind))
            }
        }
        Operation::Update | Operation::Delete => {
            if context.existing_str("assignedBy") == Some(caller) {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny(DenyReason::not_owner(&context.kind, context.operation))
            }
        }
    }
}

/// Append-only collections accept creates from any authenticated caller and
/// refuse everything else.
fn decide_append_only(context: &PolicyContext) -> AccessDecision {
    match context.operation {
        Operation::Create => AccessDecision::Allow,
        Operation::Read => AccessDecision::Deny(DenyReason::operation_not_permitted(
            &context.kind,
            context.operation,
        )),
        Operation::Update | Operation::Delete => {
            AccessDecision::Deny(DenyReason::append_only(&context.kind))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
