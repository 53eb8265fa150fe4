//! Sign-out use case implementation.

use tracing::{debug, error, info, warn};

use crate::domain::errors::AuthError;
use crate::domain::ports::SessionClient;

/// Forwards a sign-out request to the session provider.
#[derive(Clone)]
pub struct LogoutUseCase {
    client: SessionClient,
}

impl LogoutUseCase {
    /// Creates new logout use case.
    #[must_use]
    pub const fn new(client: SessionClient) -> Self {
        Self { client }
    }

    /// Ends the provider session.
    ///
    /// # Errors
    /// Returns [`AuthError::ProviderUnavailable`] if the provider failed to
    /// initialize, or the provider's error if sign-out fails.
    pub async fn execute(&self) -> Result<(), AuthError> {
        let provider = self.client.provider().inspect_err(|e| {
            warn!(error = %e, "Sign-out requested but session provider is unavailable");
        })?;

        debug!("Signing out");

        match provider.sign_out().await {
            Ok(()) => {
                info!("Signed out");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Sign-out failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::entities::Identity;
    use crate::domain::errors::ProviderInitError;
    use crate::domain::ports::mocks::MockSessionProvider;

    #[tokio::test]
    async fn test_logout_clears_provider_session() {
        let provider = Arc::new(MockSessionProvider::new());
        provider
            .notifier()
            .publish(Some(Identity::new("u1").with_display_name("Taro")));

        let use_case = LogoutUseCase::new(SessionClient::Ready(provider.clone()));
        tokio_test::assert_ok!(use_case.execute().await);

        assert_eq!(provider.notifier().current(), Some(None));
    }

    #[tokio::test]
    async fn test_logout_while_signed_out_is_harmless() {
        let provider = Arc::new(MockSessionProvider::new());
        provider.notifier().publish(None);

        let use_case = LogoutUseCase::new(SessionClient::Ready(provider.clone()));
        tokio_test::assert_ok!(use_case.execute().await);
        tokio_test::assert_ok!(use_case.execute().await);

        assert_eq!(provider.sign_out_calls(), 2);
        assert_eq!(provider.notifier().current(), Some(None));
    }

    #[tokio::test]
    async fn test_failed_logout_keeps_session() {
        let provider = Arc::new(MockSessionProvider::new());
        let taro = Identity::new("u1").with_display_name("Taro");
        provider.notifier().publish(Some(taro.clone()));
        provider.set_should_succeed(false);

        let use_case = LogoutUseCase::new(SessionClient::Ready(provider.clone()));
        let result = use_case.execute().await;

        assert!(matches!(result, Err(AuthError::NetworkError { .. })));
        assert_eq!(provider.notifier().current(), Some(Some(taro)));
    }

    #[tokio::test]
    async fn test_unavailable_provider_short_circuits() {
        let client = SessionClient::from_init(Err(ProviderInitError::invalid(
            "firebase.api_key",
            "contains whitespace",
        )));

        let result = LogoutUseCase::new(client).execute().await;

        assert!(matches!(result, Err(AuthError::ProviderUnavailable { .. })));
    }
}
