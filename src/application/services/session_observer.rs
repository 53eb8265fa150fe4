//! Mirrors provider-pushed session changes into local state.

use std::sync::Arc;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{SessionEvent, SessionState};
use crate::domain::ports::{SessionClient, SessionSubscription};

/// Owner of the local session state.
///
/// A single background task holds the provider subscription and is the only
/// writer of the state. Readers get consistent snapshots through
/// [`state`](Self::state) or a [`watch`](Self::watch) receiver.
pub struct SessionObserver {
    state_tx: Arc<watch::Sender<SessionState>>,
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SessionObserver {
    /// Subscribes to the provider behind `client`.
    ///
    /// When the provider is unavailable the state resolves to
    /// `Unauthenticated` right away and no subscription is made.
    #[must_use]
    pub fn start(client: &SessionClient) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Loading);
        let state_tx = Arc::new(state_tx);

        match client {
            SessionClient::Unavailable(e) => {
                warn!(error = %e, "Session provider is not initialized, authentication disabled");
                state_tx.send_replace(SessionState::Unauthenticated);
                Self {
                    state_tx,
                    stop_tx: None,
                    task: None,
                }
            }
            SessionClient::Ready(provider) => {
                let subscription = provider.subscribe();
                let (stop_tx, stop_rx) = oneshot::channel();
                let task = tokio::spawn(Self::run(subscription, Arc::clone(&state_tx), stop_rx));

                debug!("Session observer subscribed");
                Self {
                    state_tx,
                    stop_tx: Some(stop_tx),
                    task: Some(task),
                }
            }
        }
    }

    async fn run(
        mut subscription: SessionSubscription,
        state_tx: Arc<watch::Sender<SessionState>>,
        mut stop_rx: oneshot::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                biased;

                _ = &mut stop_rx => break,

                event = subscription.recv() => match event {
                    Some(event) => Self::apply(&state_tx, &event),
                    None => {
                        debug!("Session provider closed the notification stream");
                        break;
                    }
                },
            }
        }

        subscription.unsubscribe();
        debug!("Session observer unsubscribed");
    }

    fn apply(state_tx: &watch::Sender<SessionState>, event: &SessionEvent) {
        if let SessionEvent::Failed(e) = event {
            error!(error = %e, "Session notification stream failed");
        }

        state_tx.send_modify(|state| {
            let previous = state.name();
            *state = std::mem::take(state).apply(event);
            match state.identity() {
                Some(identity) => info!(
                    from = previous,
                    uid = %identity.uid(),
                    "Session state updated"
                ),
                None => info!(from = previous, to = state.name(), "Session state updated"),
            }
        });
    }

    /// Snapshot of the current state.
    #[cfg(test)]
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    #[cfg(test)]
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.stop_tx.is_some()
    }

    /// Stops listening. Only the first call has an effect.
    pub fn teardown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
            debug!("Session observer teardown requested");
        }
    }

    /// Tears down and waits until the subscription is released.
    pub async fn shutdown(mut self) {
        self.teardown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Session observer task ended abnormally");
            }
        }
    }
}

impl Drop for SessionObserver {
    fn drop(&mut self) {
        self.teardown();
    }
}
