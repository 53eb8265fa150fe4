//! Authentication error types.

use thiserror::Error;

/// Authentication error variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("authentication service is not initialized: {reason}")]
    ProviderUnavailable { reason: String },

    #[error("sign-in was rejected: {message}")]
    Rejected { message: String },

    #[error("sign-in request expired before it was approved")]
    HandshakeExpired,

    #[error("session is no longer valid: {message}")]
    SessionRevoked { message: String },

    #[error("network error during authentication: {message}")]
    NetworkError { message: String },

    #[error("rate limited by the identity provider")]
    RateLimited,

    #[error("unexpected response from the identity provider: {message}")]
    InvalidResponse { message: String },

    #[error("secure storage error: {message}")]
    Storage { message: String },

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates provider unavailable error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            reason: reason.into(),
        }
    }

    /// Creates rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates revoked session error.
    #[must_use]
    pub fn revoked(message: impl Into<String>) -> Self {
        Self::SessionRevoked {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[cfg(test)]
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::RateLimited)
    }

    /// Returns whether the provider could not be reached at all.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable { .. })
    }
}
