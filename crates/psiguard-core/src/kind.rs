use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document categories governed by the access policy.
///
/// Paths address documents by their plural collection name
/// (`patients/p1`, `auditLogs/log1`); the kind is the singular,
/// policy-facing name. Collections outside the known set map to
/// [`ResourceKind::Other`], which the policy denies across the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Patient,
    Appointment,
    AuditLog,
    Chat,
    Feedback,
    User,
    Assessment,
    #[serde(untagged)]
    Other(String),
}

impl ResourceKind {
    /// Maps a collection name to its kind. Total: unknown collections
    /// become [`ResourceKind::Other`] rather than an error.
    pub fn from_collection(collection: &str) -> Self {
        match collection {
            "patients" => ResourceKind::Patient,
            "appointments" => ResourceKind::Appointment,
            "auditLogs" => ResourceKind::AuditLog,
            "chats" => ResourceKind::Chat,
            "feedback" => ResourceKind::Feedback,
            "users" => ResourceKind::User,
            "assessments" => ResourceKind::Assessment,
            other => ResourceKind::Other(other.to_string()),
        }
    }

    /// The collection name documents of this kind live under.
    pub fn collection(&self) -> &str {
        match self {
            ResourceKind::Patient => "patients",
            ResourceKind::Appointment => "appointments",
            ResourceKind::AuditLog => "auditLogs",
            ResourceKind::Chat => "chats",
            ResourceKind::Feedback => "feedback",
            ResourceKind::User => "users",
            ResourceKind::Assessment => "assessments",
            ResourceKind::Other(name) => name,
        }
    }

    /// Whether this kind has rows in the policy table.
    pub fn is_known(&self) -> bool {
        !matches!(self, ResourceKind::Other(_))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Patient => write!(f, "patient"),
            ResourceKind::Appointment => write!(f, "appointment"),
            ResourceKind::AuditLog => write!(f, "auditLog"),
            ResourceKind::Chat => write!(f, "chat"),
            ResourceKind::Feedback => write!(f, "feedback"),
            ResourceKind::User => write!(f, "user"),
            ResourceKind::Assessment => write!(f, "assessment"),
            ResourceKind::Other(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(ResourceKind::Patient),
            "appointment" => Ok(ResourceKind::Appointment),
            "auditLog" => Ok(ResourceKind::AuditLog),
            "chat" => Ok(ResourceKind::Chat),
            "feedback" => Ok(ResourceKind::Feedback),
            "user" => Ok(ResourceKind::User),
            "assessment" => Ok(ResourceKind::Assessment),
            name => {
                if is_valid_kind_name(name) {
                    Ok(ResourceKind::Other(name.to_string()))
                } else {
                    Err(CoreError::invalid_resource_kind(name))
                }
            }
        }
    }
}

/// Kind names are plain camelCase identifiers: a leading ASCII letter
/// followed by letters and digits.
pub fn is_valid_kind_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .map(|c| c.is_ascii_alphabetic())
        .unwrap_or(false)
        && chars.all(|c| c.is_ascii_alphanumeric())
}
