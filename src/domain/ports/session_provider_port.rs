//! Session provider port definition.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::entities::SessionEvent;
use crate::domain::errors::{AuthError, ProviderInitError};

/// Active registration for session notifications.
///
/// Unregisters exactly once, either through [`unsubscribe`](Self::unsubscribe)
/// or when dropped.
pub struct SessionSubscription {
    receiver: mpsc::UnboundedReceiver<SessionEvent>,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl SessionSubscription {
    /// Wraps a receiver with the action that unregisters it.
    #[must_use]
    pub fn new(
        receiver: mpsc::UnboundedReceiver<SessionEvent>,
        cancel: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            receiver,
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Waits for the next notification. Returns `None` once the provider is gone.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        self.receiver.recv().await
    }

    /// Returns an already delivered notification without waiting.
    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        self.receiver.try_recv().ok()
    }

    /// Stops receiving notifications.
    pub fn unsubscribe(mut self) {
        self.cancel_registration();
    }

    fn cancel_registration(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
        self.receiver.close();
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.cancel_registration();
    }
}

impl fmt::Debug for SessionSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSubscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Port for the external service that owns the login session.
#[async_trait]
pub trait SessionProviderPort: Send + Sync {
    /// Registers a listener for session changes.
    ///
    /// The first notification arrives once the provider knows whether anyone
    /// is signed in.
    fn subscribe(&self) -> SessionSubscription;

    /// Runs the interactive sign-in handshake.
    ///
    /// The resulting identity is delivered through subscriptions, not returned.
    async fn sign_in(&self) -> Result<(), AuthError>;

    /// Ends the current session, if any.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Handle to the session provider, or the reason it could not be created.
#[derive(Clone)]
pub enum SessionClient {
    /// Provider initialized and usable.
    Ready(Arc<dyn SessionProviderPort>),
    /// Provider initialization failed; every operation short-circuits.
    Unavailable(Arc<ProviderInitError>),
}

impl SessionClient {
    /// Builds a client from the outcome of provider initialization.
    #[must_use]
    pub fn from_init(result: Result<Arc<dyn SessionProviderPort>, ProviderInitError>) -> Self {
        match result {
            Ok(provider) => Self::Ready(provider),
            Err(e) => Self::Unavailable(Arc::new(e)),
        }
    }

    /// Returns the provider or an [`AuthError::ProviderUnavailable`].
    ///
    /// # Errors
    /// Returns error if provider initialization failed.
    pub fn provider(&self) -> Result<&Arc<dyn SessionProviderPort>, AuthError> {
        match self {
            Self::Ready(provider) => Ok(provider),
            Self::Unavailable(e) => Err(AuthError::unavailable(e.to_string())),
        }
    }
}

impl fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(_) => f.write_str("SessionClient::Ready"),
            Self::Unavailable(e) => write!(f, "SessionClient::Unavailable({e})"),
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use crate::domain::entities::Identity;
    use crate::domain::services::SessionNotifier;

    /// Mock session provider for testing.
    pub struct MockSessionProvider {
        notifier: SessionNotifier,
        identity: Identity,
        should_succeed: AtomicBool,
        sign_in_calls: AtomicUsize,
        sign_out_calls: AtomicUsize,
    }

    impl MockSessionProvider {
        /// Creates new mock whose initial session is not yet known.
        pub fn new() -> Self {
            Self {
                notifier: SessionNotifier::new(),
                identity: Identity::new("u1").with_display_name("Taro"),
                should_succeed: AtomicBool::new(true),
                sign_in_calls: AtomicUsize::new(0),
                sign_out_calls: AtomicUsize::new(0),
            }
        }

        /// Sets success behavior.
        pub fn set_should_succeed(&self, value: bool) {
            self.should_succeed.store(value, Ordering::SeqCst);
        }

        /// Gives direct access to the notification stream.
        pub fn notifier(&self) -> &SessionNotifier {
            &self.notifier
        }

        pub fn sign_in_calls(&self) -> usize {
            self.sign_in_calls.load(Ordering::SeqCst)
        }

        pub fn sign_out_calls(&self) -> usize {
            self.sign_out_calls.load(Ordering::SeqCst)
        }
    }

    impl Default for MockSessionProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SessionProviderPort for MockSessionProvider {
        fn subscribe(&self) -> SessionSubscription {
            self.notifier.subscribe()
        }

        async fn sign_in(&self) -> Result<(), AuthError> {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            if self.should_succeed.load(Ordering::SeqCst) {
                self.notifier.publish(Some(self.identity.clone()));
                Ok(())
            } else {
                Err(AuthError::rejected("mock rejection"))
            }
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            if self.should_succeed.load(Ordering::SeqCst) {
                self.notifier.publish(None);
                Ok(())
            } else {
                Err(AuthError::network("mock network failure"))
            }
        }
    }
}
