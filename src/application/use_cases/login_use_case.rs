//! Sign-in use case implementation.

use tracing::{debug, error, info, warn};

use crate::domain::errors::AuthError;
use crate::domain::ports::SessionClient;

/// Forwards a sign-in request to the session provider.
///
/// Never touches local session state: the observer picks up the outcome from
/// the provider's notifications.
#[derive(Clone)]
pub struct LoginUseCase {
    client: SessionClient,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(client: SessionClient) -> Self {
        Self { client }
    }

    /// Runs the interactive sign-in handshake.
    ///
    /// # Errors
    /// Returns [`AuthError::ProviderUnavailable`] without contacting anything
    /// if the provider failed to initialize, or the provider's error if the
    /// handshake fails.
    pub async fn execute(&self) -> Result<(), AuthError> {
        let provider = self.client.provider().inspect_err(|e| {
            warn!(error = %e, "Sign-in requested but session provider is unavailable");
        })?;

        debug!("Starting interactive sign-in");

        match provider.sign_in().await {
            Ok(()) => {
                info!("Sign-in handshake completed");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Sign-in failed");
                Err(e)
            }
        }
    }
}
