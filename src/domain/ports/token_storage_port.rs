//! Refresh token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::SecretToken;
use crate::domain::errors::AuthError;

/// Port for persisting the session's refresh token.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored token.
    async fn get_token(&self) -> Result<Option<SecretToken>, AuthError>;

    /// Stores token securely.
    async fn store_token(&self, token: &SecretToken) -> Result<(), AuthError>;

    /// Deletes stored token. Deleting a missing token is not an error.
    async fn delete_token(&self) -> Result<(), AuthError>;

    /// Checks if token exists.
    async fn has_token(&self) -> Result<bool, AuthError> {
        Ok(self.get_token().await?.is_some())
    }
}
