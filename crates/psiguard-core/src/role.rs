use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Clinic staff roles recognized by the access policy.
///
/// A principal may also carry no role at all (patients signing in to read
/// their own appointments have an account but no staff role), which is
/// modeled as `Option<Role>` on the principal, not as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Psychologist,
    Secretary,
}

impl Role {
    /// All roles, in no particular order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Psychologist, Role::Secretary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Psychologist => "psychologist",
            Role::Secretary => "secretary",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "psychologist" => Ok(Role::Psychologist),
            "secretary" => Ok(Role::Secretary),
            other => Err(CoreError::invalid_role(other)),
        }
    }
}
