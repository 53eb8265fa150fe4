//! Fan-out of session changes to subscribers.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::trace;

use crate::domain::entities::{Identity, SessionEvent};
use crate::domain::errors::AuthError;
use crate::domain::ports::SessionSubscription;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, mpsc::UnboundedSender<SessionEvent>>,
    /// `None` until the provider has determined the initial session.
    current: Option<Option<Identity>>,
    /// Failure raised before the initial session was determined.
    initial_failure: Option<AuthError>,
}

impl Registry {
    fn dispatch(&mut self, event: &SessionEvent) {
        self.listeners
            .retain(|id, tx| match tx.send(event.clone()) {
                Ok(()) => true,
                Err(_) => {
                    trace!(listener = id, "Dropping closed session listener");
                    false
                }
            });
    }
}

/// Listener registry shared by session provider implementations.
///
/// Events are sent while holding the registry lock, so every listener sees
/// them in the order they were published. A listener that subscribes after
/// the initial session is known immediately receives the current identity;
/// one that subscribes after the initial session failed to load receives that
/// failure.
#[derive(Clone, Default)]
pub struct SessionNotifier {
    inner: Arc<Mutex<Registry>>,
}

impl SessionNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        let (tx, rx) = mpsc::unbounded_channel();

        let id = {
            let mut registry = self.inner.lock();
            let id = registry.next_id;
            registry.next_id += 1;

            if let Some(current) = &registry.current {
                let _ = tx.send(SessionEvent::Changed(current.clone()));
            } else if let Some(error) = &registry.initial_failure {
                let _ = tx.send(SessionEvent::Failed(error.clone()));
            }
            registry.listeners.insert(id, tx);
            id
        };

        trace!(listener = id, "Session listener registered");

        let registry = Arc::downgrade(&self.inner);
        SessionSubscription::new(rx, move || {
            if let Some(registry) = registry.upgrade() {
                registry.lock().listeners.remove(&id);
                trace!(listener = id, "Session listener removed");
            }
        })
    }

    /// Records and broadcasts the current identity.
    pub fn publish(&self, identity: Option<Identity>) {
        let mut registry = self.inner.lock();
        registry.current = Some(identity.clone());
        registry.initial_failure = None;
        registry.dispatch(&SessionEvent::Changed(identity));
    }

    /// Broadcasts a failure without changing the recorded identity.
    pub fn fail(&self, error: AuthError) {
        let mut registry = self.inner.lock();
        if registry.current.is_none() {
            registry.initial_failure = Some(error.clone());
        }
        registry.dispatch(&SessionEvent::Failed(error));
    }

    /// Identity last published, if the initial session has been determined.
    #[must_use]
    pub fn current(&self) -> Option<Option<Identity>> {
        self.inner.lock().current.clone()
    }

    #[cfg(test)]
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taro() -> Identity {
        Identity::new("u1").with_display_name("Taro")
    }

    #[tokio::test]
    async fn test_no_event_before_initial_session() {
        let notifier = SessionNotifier::new();
        let mut subscription = notifier.subscribe();

        assert!(subscription.try_recv().is_none());

        notifier.publish(None);
        assert!(matches!(
            subscription.recv().await,
            Some(SessionEvent::Changed(None))
        ));
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_current_identity() {
        let notifier = SessionNotifier::new();
        notifier.publish(Some(taro()));

        let mut subscription = notifier.subscribe();
        match subscription.recv().await {
            Some(SessionEvent::Changed(Some(identity))) => assert_eq!(identity, taro()),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_events_delivered_in_order() {
        let notifier = SessionNotifier::new();
        let mut subscription = notifier.subscribe();

        notifier.publish(Some(taro()));
        notifier.fail(AuthError::network("offline"));
        notifier.publish(None);

        assert!(matches!(
            subscription.recv().await,
            Some(SessionEvent::Changed(Some(_)))
        ));
        assert!(matches!(
            subscription.recv().await,
            Some(SessionEvent::Failed(AuthError::NetworkError { .. }))
        ));
        assert!(matches!(
            subscription.recv().await,
            Some(SessionEvent::Changed(None))
        ));
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_initial_failure() {
        let notifier = SessionNotifier::new();
        notifier.fail(AuthError::network("offline"));

        let mut subscription = notifier.subscribe();
        assert!(matches!(
            subscription.recv().await,
            Some(SessionEvent::Failed(AuthError::NetworkError { .. }))
        ));
        assert!(subscription.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_publish_replaces_initial_failure() {
        let notifier = SessionNotifier::new();
        notifier.fail(AuthError::network("offline"));
        notifier.publish(Some(taro()));
        notifier.fail(AuthError::network("offline again"));

        let mut subscription = notifier.subscribe();
        match subscription.recv().await {
            Some(SessionEvent::Changed(Some(identity))) => assert_eq!(identity, taro()),
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(subscription.try_recv().is_none());
    }

    #[test]
    fn test_failure_does_not_change_current() {
        let notifier = SessionNotifier::new();
        notifier.publish(Some(taro()));
        notifier.fail(AuthError::network("offline"));

        assert_eq!(notifier.current(), Some(Some(taro())));
    }

    #[test]
    fn test_unsubscribe_removes_listener() {
        let notifier = SessionNotifier::new();
        let subscription = notifier.subscribe();
        assert_eq!(notifier.listener_count(), 1);

        subscription.unsubscribe();
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_drop_removes_listener() {
        let notifier = SessionNotifier::new();
        {
            let _first = notifier.subscribe();
            let _second = notifier.subscribe();
            assert_eq!(notifier.listener_count(), 2);
        }
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_after_notifier_dropped() {
        let notifier = SessionNotifier::new();
        let subscription = notifier.subscribe();
        drop(notifier);

        subscription.unsubscribe();
    }
}
