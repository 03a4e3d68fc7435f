//! # psiguard-access
//!
//! Access control for the PsiGuard document collections.
//!
//! This crate provides:
//! - Caller identity modeling (roles, roleless users, anonymous callers)
//! - Request path classification
//! - A pure rule evaluation engine over a per-collection rule set
//! - A policy guard that enforces decisions in front of a document store
//! - Uniform, non-revealing denial errors
//!
//! ## Overview
//!
//! Every operation names a target as `collection/id`. The guard classifies
//! the target, gathers the stored document and any referenced-user existence
//! flags the rules need, evaluates the rule set, and only then delegates to
//! the underlying [`DocumentStore`](psiguard_storage::DocumentStore). The
//! evaluator itself is a pure function: no I/O, no failures, same decision
//! for the same inputs.
//!
//! ## Modules
//!
//! - [`config`] - Guard and evaluator configuration
//! - [`error`] - Access control error types
//! - [`identity`] - Caller identity ([`Principal`])
//! - [`policy`] - Classification, context, and the rule engine
//! - [`guard`] - Policy-enforced document operations

pub mod config;
pub mod error;
pub mod guard;
pub mod identity;
pub mod policy;

pub use config::{AccessConfig, ConfigError};
pub use error::{AccessError, ErrorCategory};
pub use guard::PolicyGuard;
pub use identity::Principal;
pub use policy::{
    AccessDecision, ContextError, DenyReason, DocumentPath, PolicyContext, PolicyContextBuilder,
    PolicyEvaluator, PolicyEvaluatorConfig, classify_collection,
};

/// Type alias for access control results.
pub type AccessResult<T> = Result<T, AccessError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use psiguard_access::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AccessResult;
    pub use crate::config::{AccessConfig, ConfigError};
    pub use crate::error::{AccessError, ErrorCategory};
    pub use crate::guard::PolicyGuard;
    pub use crate::identity::Principal;
    pub use crate::policy::{
        AccessDecision, DenyReason, DocumentPath, PolicyContext, PolicyContextBuilder,
        PolicyEvaluator, PolicyEvaluatorConfig,
    };
}
