// src/error.rs

use thiserror::Error;

/// Error taxonomy for the configuration synchronizer.
///
/// Transport and decode failures abort a refresh with no state change;
/// the previously resolved configuration stays authoritative. Per-field
/// validation failures never reach callers at all, they are absorbed by
/// the fallback chain in the resolver.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Storage operation failed: {operation} - {message}")]
    Storage { operation: String, message: String },

    #[error("Endpoint override rejected: {input:?} is not an absolute URL")]
    OverrideRejected { input: String },

    #[error("Validation failed: {field} - {message}")]
    Validation { field: String, message: String },
}

impl ConfigError {
    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new override-rejected error
    pub fn override_rejected(input: impl Into<String>) -> Self {
        Self::OverrideRejected {
            input: input.into(),
        }
    }

    /// True for connectivity-level failures (including timeouts).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// Result type alias for the crate
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
