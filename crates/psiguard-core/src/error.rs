use thiserror::Error;

/// Core error types for PsiGuard domain operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid resource kind: {0}")]
    InvalidResourceKind(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid document ID: {0}")]
    InvalidId(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Time parsing error: {0}")]
    TimeError(#[from] time::error::Parse),

    #[error("UUID error: {0}")]
    UuidError(#[from] uuid::Error),

    #[error("Invalid document data: {message}")]
    InvalidDocument { message: String },
}

impl CoreError {
    /// Create a new InvalidRole error
    pub fn invalid_role(role: impl Into<String>) -> Self {
        Self::InvalidRole(role.into())
    }

    /// Create a new InvalidResourceKind error
    pub fn invalid_resource_kind(kind: impl Into<String>) -> Self {
        Self::InvalidResourceKind(kind.into())
    }

    /// Create a new InvalidOperation error
    pub fn invalid_operation(operation: impl Into<String>) -> Self {
        Self::InvalidOperation(operation.into())
    }

    /// Create a new InvalidId error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    /// Create a new InvalidTimestamp error
    pub fn invalid_timestamp(timestamp: impl Into<String>) -> Self {
        Self::InvalidTimestamp(timestamp.into())
    }

    /// Create a new InvalidDocument error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Check if this error is a client error (bad input)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRole(_)
                | Self::InvalidResourceKind(_)
                | Self::InvalidOperation(_)
                | Self::InvalidId(_)
                | Self::InvalidTimestamp(_)
                | Self::InvalidDocument { .. }
                | Self::JsonError(_)
        )
    }

    /// Check if this error is a server error (internal failure)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::TimeError(_) | Self::UuidError(_))
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRole(_)
            | Self::InvalidResourceKind(_)
            | Self::InvalidOperation(_)
            | Self::InvalidId(_)
            | Self::InvalidTimestamp(_)
            | Self::InvalidDocument { .. } => ErrorCategory::Validation,
            Self::JsonError(_) => ErrorCategory::Serialization,
            Self::TimeError(_) | Self::UuidError(_) => ErrorCategory::System,
        }
    }
}

/// Error categories for monitoring and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Serialization,
    System,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Serialization => write!(f, "serialization"),
            Self::System => write!(f, "system"),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
