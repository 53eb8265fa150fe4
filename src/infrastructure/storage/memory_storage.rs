//! Process-local token storage used when sessions are not persisted.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::entities::SecretToken;
use crate::domain::errors::AuthError;
use crate::domain::ports::TokenStoragePort;

/// Keeps the refresh token only for the lifetime of the process.
#[derive(Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<SecretToken>>,
}

impl MemoryTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStoragePort for MemoryTokenStorage {
    async fn get_token(&self) -> Result<Option<SecretToken>, AuthError> {
        Ok(self.token.lock().clone())
    }

    async fn store_token(&self, token: &SecretToken) -> Result<(), AuthError> {
        *self.token.lock() = Some(token.clone());
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), AuthError> {
        self.token.lock().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_store_then_delete() {
        let storage = MemoryTokenStorage::new();
        assert!(!assert_ok!(storage.has_token().await));

        let token = SecretToken::new_unchecked("refresh");
        assert_ok!(storage.store_token(&token).await);
        assert_eq!(assert_ok!(storage.get_token().await), Some(token));

        assert_ok!(storage.delete_token().await);
        assert_ok!(storage.delete_token().await);
        assert!(assert_ok!(storage.get_token().await).is_none());
    }
}
