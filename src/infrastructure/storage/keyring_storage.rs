//! Keyring-based refresh token storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::SecretToken;
use crate::domain::errors::AuthError;
use crate::domain::ports::TokenStoragePort;

const KEYRING_SERVICE: &str = "zaimu-anki";
const KEYRING_USER: &str = "refresh-token";

/// System keyring token storage adapter.
pub struct KeyringTokenStorage {
    service: String,
    user: String,
}

impl KeyringTokenStorage {
    /// Creates new storage with default names.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
            user: KEYRING_USER.to_string(),
        }
    }

    /// Creates storage with custom names.
    #[cfg(test)]
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> Result<Entry, AuthError> {
        Entry::new(&self.service, &self.user)
            .map_err(|e| AuthError::storage(format!("failed to access keyring: {e}")))
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<SecretToken>, AuthError> {
        debug!(service = %self.service, "Reading refresh token from keyring");

        match self.entry()?.get_password() {
            Ok(password) => {
                let token = SecretToken::new(password);
                if token.is_none() {
                    warn!("Keyring holds a malformed refresh token, ignoring it");
                }
                Ok(token)
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No refresh token stored in keyring");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to read refresh token from keyring");
                Err(AuthError::storage(e.to_string()))
            }
        }
    }

    async fn store_token(&self, token: &SecretToken) -> Result<(), AuthError> {
        debug!(service = %self.service, token = %token, "Storing refresh token in keyring");

        self.entry()?.set_password(token.as_str()).map_err(|e| {
            warn!(error = %e, "Failed to store refresh token in keyring");
            AuthError::storage(e.to_string())
        })
    }

    async fn delete_token(&self) -> Result<(), AuthError> {
        debug!(service = %self.service, "Deleting refresh token from keyring");

        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to delete refresh token from keyring");
                Err(AuthError::storage(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires system keyring"]
    async fn test_store_and_retrieve_token() {
        let storage = KeyringTokenStorage::with_names("zaimu-anki-test", "refresh-token");
        let token = SecretToken::new_unchecked("AMf-vBx_refresh_token_value");

        storage.store_token(&token).await.unwrap();
        assert_eq!(storage.get_token().await.unwrap(), Some(token));

        storage.delete_token().await.unwrap();
        assert!(!storage.has_token().await.unwrap());
    }
}
