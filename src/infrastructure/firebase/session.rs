//! Firebase-backed session provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::app::FirebaseApp;
use super::client::{FirebaseSession, IdentityToolkitClient};
use crate::domain::errors::AuthError;
use crate::domain::ports::{
    IdentityProviderPort, SessionProviderPort, SessionSubscription, TokenStoragePort,
};
use crate::domain::services::SessionNotifier;

/// Session provider that signs in through a federated identity provider and
/// keeps the Firebase refresh token in `storage`.
pub struct FirebaseSessionProvider {
    auth: IdentityToolkitClient,
    identity_provider: Arc<dyn IdentityProviderPort>,
    storage: Arc<dyn TokenStoragePort>,
    notifier: SessionNotifier,
}

impl FirebaseSessionProvider {
    #[must_use]
    pub fn new(
        app: &FirebaseApp,
        identity_provider: Arc<dyn IdentityProviderPort>,
        storage: Arc<dyn TokenStoragePort>,
    ) -> Self {
        Self {
            auth: app.auth().clone(),
            identity_provider,
            storage,
            notifier: SessionNotifier::new(),
        }
    }

    /// Determines the initial session from the stored refresh token and
    /// publishes it.
    ///
    /// A token Firebase no longer accepts is discarded and reported as "no
    /// identity". Any other failure is reported on the notification stream.
    pub async fn restore(&self) {
        let refresh_token = match self.storage.get_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No stored session");
                self.notifier.publish(None);
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored session");
                self.notifier.publish(None);
                return;
            }
        };

        debug!(token = %refresh_token, "Restoring stored session");

        match self.auth.restore_session(&refresh_token).await {
            Ok(session) => {
                info!(uid = %session.identity.uid(), "Stored session restored");
                self.establish(session).await;
            }
            Err(e @ (AuthError::SessionRevoked { .. } | AuthError::Rejected { .. })) => {
                info!(error = %e, "Stored session is no longer valid");
                if let Err(e) = self.storage.delete_token().await {
                    warn!(error = %e, "Failed to discard stored session");
                }
                self.notifier.publish(None);
            }
            Err(e) => {
                warn!(error = %e, "Could not restore stored session");
                self.notifier.fail(e);
            }
        }
    }

    async fn establish(&self, session: FirebaseSession) {
        if let Err(e) = self.storage.store_token(&session.refresh_token).await {
            tracing::error!(error = %e, "Failed to persist session, it will not survive a restart");
        }

        self.notifier.publish(Some(session.identity));
    }
}

#[async_trait]
impl SessionProviderPort for FirebaseSessionProvider {
    fn subscribe(&self) -> SessionSubscription {
        self.notifier.subscribe()
    }

    async fn sign_in(&self) -> Result<(), AuthError> {
        let credential = self.identity_provider.authorize().await?;
        let session = self.auth.sign_in_with_idp(&credential).await?;

        info!(uid = %session.identity.uid(), "Signed in to Firebase");
        self.establish(session).await;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.storage.delete_token().await?;

        if let Some(Some(identity)) = self.notifier.current() {
            info!(uid = %identity.uid(), "Signed out of Firebase");
        }
        self.notifier.publish(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::application::services::SessionObserver;
    use crate::domain::entities::{SecretToken, SessionEvent, SessionState};
    use crate::domain::ports::SessionClient;
    use crate::domain::ports::mocks::MockTokenStorage;
    use crate::domain::ports::{IdpCredential, MockIdentityProviderPort};
    use crate::infrastructure::config::FirebaseConfig;

    fn offline_app() -> FirebaseApp {
        FirebaseApp::initialize(&FirebaseConfig {
            api_key: "AIzaTestKey".to_string(),
            auth_domain: "demo.firebaseapp.com".to_string(),
            project_id: "demo".to_string(),
            storage_bucket: "demo.firebasestorage.app".to_string(),
            messaging_sender_id: "1234".to_string(),
            app_id: "1:1234:web:abcd".to_string(),
            identity_toolkit_url: "http://127.0.0.1:9".to_string(),
            secure_token_url: "http://127.0.0.1:9".to_string(),
        })
        .unwrap()
    }

    fn provider_with(
        identity_provider: MockIdentityProviderPort,
        storage: Arc<MockTokenStorage>,
    ) -> FirebaseSessionProvider {
        FirebaseSessionProvider::new(&offline_app(), Arc::new(identity_provider), storage)
    }

    #[tokio::test]
    async fn test_restore_without_stored_session() {
        let provider = provider_with(
            MockIdentityProviderPort::new(),
            Arc::new(MockTokenStorage::new()),
        );
        let mut subscription = provider.subscribe();

        provider.restore().await;

        assert!(matches!(
            subscription.recv().await,
            Some(SessionEvent::Changed(None))
        ));
    }

    #[tokio::test]
    async fn test_restore_offline_reports_stream_error() {
        let storage = Arc::new(MockTokenStorage::with_token(SecretToken::new_unchecked(
            "stored-refresh-token",
        )));
        let provider = provider_with(MockIdentityProviderPort::new(), storage.clone());
        let mut subscription = provider.subscribe();

        provider.restore().await;

        assert!(matches!(
            subscription.recv().await,
            Some(SessionEvent::Failed(AuthError::NetworkError { .. }))
        ));
        assert!(storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_observer_started_after_failed_restore_is_unauthenticated() {
        let storage = Arc::new(MockTokenStorage::with_token(SecretToken::new_unchecked(
            "stored-refresh-token",
        )));
        let provider = Arc::new(provider_with(MockIdentityProviderPort::new(), storage));

        provider.restore().await;

        let observer = SessionObserver::start(&SessionClient::Ready(provider));
        let mut rx = observer.watch();
        let state = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| !s.is_loading()))
            .await
            .expect("observer stayed in Loading")
            .unwrap()
            .clone();

        assert_eq!(state, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_rejected_handshake_changes_nothing() {
        let mut identity_provider = MockIdentityProviderPort::new();
        identity_provider
            .expect_authorize()
            .times(1)
            .returning(|| Err(AuthError::rejected("access_denied")));
        let storage = Arc::new(MockTokenStorage::new());
        let provider = provider_with(identity_provider, storage.clone());

        let result = provider.sign_in().await;

        assert!(matches!(result, Err(AuthError::Rejected { .. })));
        assert!(!storage.has_token().await.unwrap());
        assert_eq!(provider.notifier.current(), None);
    }

    #[tokio::test]
    async fn test_exchange_failure_changes_nothing() {
        let mut identity_provider = MockIdentityProviderPort::new();
        identity_provider.expect_authorize().returning(|| {
            Ok(IdpCredential {
                provider_id: "google.com".to_string(),
                id_token: SecretToken::new_unchecked("google-id-token"),
            })
        });
        let provider = provider_with(identity_provider, Arc::new(MockTokenStorage::new()));

        let result = provider.sign_in().await;

        assert!(result.is_err_and(|e| e.is_network_error()));
        assert_eq!(provider.notifier.current(), None);
    }

    #[tokio::test]
    async fn test_sign_out_clears_stored_session() {
        let storage = Arc::new(MockTokenStorage::with_token(SecretToken::new_unchecked(
            "stored-refresh-token",
        )));
        let provider = provider_with(MockIdentityProviderPort::new(), storage.clone());
        let mut subscription = provider.subscribe();

        provider.sign_out().await.unwrap();

        assert!(!storage.has_token().await.unwrap());
        assert!(matches!(
            subscription.recv().await,
            Some(SessionEvent::Changed(None))
        ));
    }

    #[tokio::test]
    async fn test_sign_out_storage_failure_is_reported() {
        let storage = Arc::new(MockTokenStorage::new());
        storage.set_fail_writes(true);
        let provider = provider_with(MockIdentityProviderPort::new(), storage);

        let result = provider.sign_out().await;

        assert!(matches!(result, Err(AuthError::Storage { .. })));
        assert_eq!(provider.notifier.current(), None);
    }
}
