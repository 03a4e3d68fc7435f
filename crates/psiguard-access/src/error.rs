//! Access control error types.
//!
//! This module defines the errors surfaced by the policy guard. Denials are
//! deliberately uniform: every refused operation maps to the same
//! [`AccessError::PermissionDenied`] shape regardless of which rule failed,
//! so callers cannot distinguish "document does not exist" from "document
//! exists but is not yours". The failed rule is only recorded in logs.

use std::fmt;

use psiguard_storage::StorageError;

/// Errors that can occur while enforcing access control.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The caller is not allowed to perform the requested operation.
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Uniform denial message.
        message: String,
    },

    /// The request path does not name a `collection/id` document.
    #[error("Invalid path: {message}")]
    InvalidPath {
        /// Description of why the path is invalid.
        message: String,
    },

    /// The underlying document store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AccessError {
    /// Creates a new `PermissionDenied` error.
    #[must_use]
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidPath` error.
    #[must_use]
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is a denied operation.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Returns `true` if this error is a malformed request path.
    #[must_use]
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }

    /// Returns `true` if this is a client error (caller can fix the request).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. } | Self::InvalidPath { .. }
        )
    }

    /// Returns `true` if this is a server error.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Internal { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PermissionDenied { .. } => ErrorCategory::Authorization,
            Self::InvalidPath { .. } => ErrorCategory::Validation,
            Self::Storage(_) => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of access control errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Authorization-related errors (permission checks).
    Authorization,
    /// Request validation errors.
    Validation,
    /// Infrastructure/storage errors.
    Infrastructure,
    /// Internal errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorization => write!(f, "authorization"),
            Self::Validation => write!(f, "validation"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
