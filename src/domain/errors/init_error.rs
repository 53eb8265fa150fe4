//! Session provider initialization errors.

use thiserror::Error;

/// Reasons the session provider could not be set up.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderInitError {
    #[error("missing configuration value `{key}`")]
    MissingKey { key: &'static str },

    #[error("invalid configuration value `{key}`: {reason}")]
    InvalidKey { key: &'static str, reason: String },

    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),
}

impl ProviderInitError {
    #[must_use]
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key,
            reason: reason.into(),
        }
    }
}
