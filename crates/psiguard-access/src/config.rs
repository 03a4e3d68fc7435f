//! Access control configuration.
//!
//! # Example (TOML)
//!
//! ```toml
//! log_decisions = true
//! deny_message = "Permission denied"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for the policy guard and evaluator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Log access decisions (allows at trace level, denies at debug level).
    pub log_decisions: bool,

    /// Message returned for every denied operation.
    ///
    /// Kept uniform on purpose: the caller-visible error never names the
    /// rule that failed.
    pub deny_message: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            log_decisions: true,
            deny_message: "Permission denied".to_string(),
        }
    }
}

impl AccessConfig {
    /// Parse a configuration from a TOML string.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(format!("TOML parse error: {e}")))
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` if its contents are malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `deny_message` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deny_message.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "deny_message cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// The configuration could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(String),

    /// The configuration file could not be read.
    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}
