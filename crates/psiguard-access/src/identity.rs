//! Caller identity for access control decisions.

use psiguard_core::Role;
use serde::{Deserialize, Serialize};

/// The identity on whose behalf an operation runs.
///
/// A principal is either anonymous or authenticated. Authenticated principals
/// carry the id of their document in the `users` collection and, optionally,
/// an assigned role. Signed-in users without a role record are modeled as
/// `role: None`; rules that require a role deny them, while rules keyed on
/// ownership or participation still apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Caller's user id. Matches the document id in the `users` collection.
    pub id: String,

    /// Assigned role, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Whether the caller presented valid credentials.
    pub authenticated: bool,
}

impl Principal {
    /// Creates an authenticated principal with the given id and optional role.
    #[must_use]
    pub fn authenticated(id: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            id: id.into(),
            role,
            authenticated: true,
        }
    }

    /// Creates an anonymous, unauthenticated principal.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            id: String::new(),
            role: None,
            authenticated: false,
        }
    }

    /// Returns `true` if the caller holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    /// Returns `true` if the caller is an authenticated admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.authenticated && self.has_role(Role::Admin)
    }

    /// Returns `true` if the caller is authenticated and `id` is their own
    /// user id.
    #[must_use]
    pub fn is_self(&self, id: &str) -> bool {
        self.authenticated && self.id == id
    }
}
