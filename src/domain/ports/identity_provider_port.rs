//! Federated identity provider port definition.

use async_trait::async_trait;

use crate::domain::entities::SecretToken;
use crate::domain::errors::AuthError;

/// Credential issued by a federated identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdpCredential {
    /// Provider identifier understood by the session provider (`google.com`).
    pub provider_id: String,
    /// OpenID Connect ID token.
    pub id_token: SecretToken,
}

/// What the user has to do to approve a sign-in on another device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePrompt {
    pub verification_url: String,
    pub user_code: String,
    /// Seconds until the code expires.
    pub expires_in: u64,
}

/// Port for the interactive handshake with a federated identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProviderPort: Send + Sync {
    /// Runs the handshake to completion or failure.
    async fn authorize(&self) -> Result<IdpCredential, AuthError>;
}
