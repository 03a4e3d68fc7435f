//! Rule-based access control for document collections.
//!
//! This module provides the decision-making half of the crate:
//!
//! - Request path classification
//! - Evaluation context assembly
//! - The rule evaluation engine
//!
//! # Classification
//!
//! The [`resource`] module resolves a `collection/id` request path into a
//! [`DocumentPath`] with its [`ResourceKind`](psiguard_core::ResourceKind):
//!
//! ```ignore
//! use psiguard_access::policy::resource::DocumentPath;
//!
//! let path = DocumentPath::parse("appointments/a1")?;
//! assert_eq!(path.collection, "appointments");
//! ```
//!
//! # Evaluation Context
//!
//! The [`context`] module provides the [`PolicyContext`] structure holding
//! everything a rule may consult:
//!
//! ```ignore
//! use psiguard_access::policy::context::PolicyContextBuilder;
//!
//! let context = PolicyContextBuilder::new()
//!     .with_principal(principal)
//!     .with_operation(Operation::Read)
//!     .with_path(&path)
//!     .with_existing(stored.document.clone())
//!     .build()?;
//! ```
//!
//! # Rule Evaluation
//!
//! The [`engine`] module maps a context to a decision:
//!
//! ```ignore
//! use psiguard_access::policy::engine::PolicyEvaluator;
//!
//! let decision = PolicyEvaluator::default().evaluate(&context);
//! assert!(decision.is_allowed() || decision.is_denied());
//! ```
//!
//! [`PolicyContext`]: context::PolicyContext
//! [`DocumentPath`]: resource::DocumentPath

pub mod context;
pub mod engine;
pub mod resource;

pub use context::{ContextError, PolicyContext, PolicyContextBuilder};

pub use engine::{AccessDecision, DenyReason, PolicyEvaluator, PolicyEvaluatorConfig};

pub use resource::{DocumentPath, classify_collection};
