//! Shared HTTP client setup.

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use crate::domain::errors::{AuthError, ProviderInitError};

const USER_AGENT: &str = concat!("zaimu-anki/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the HTTP client used for identity endpoints.
///
/// # Errors
/// Returns error if the TLS backend cannot be initialized.
pub fn build_client() -> Result<Client, ProviderInitError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ProviderInitError::HttpClient(e.to_string()))
}

/// Maps a transport failure to an authentication error.
pub fn request_error(e: &reqwest::Error) -> AuthError {
    warn!(error = %e, "Identity request failed");
    if e.is_timeout() {
        AuthError::network("request timed out")
    } else if e.is_connect() {
        AuthError::network("failed to connect to the identity provider")
    } else if e.is_decode() {
        AuthError::invalid_response(e.to_string())
    } else {
        AuthError::network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(build_client().is_ok());
    }
}
