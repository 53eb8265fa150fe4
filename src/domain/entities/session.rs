//! Session lifecycle as seen by the application.

use super::Identity;
use crate::domain::errors::AuthError;

/// Notification pushed by the session provider.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The signed-in identity changed; `None` means nobody is signed in.
    Changed(Option<Identity>),
    /// The provider could not determine the session.
    Failed(AuthError),
}

/// Local mirror of the provider's session.
///
/// `Loading` is only ever the initial state. Once any event has been applied
/// the state is `Authenticated` or `Unauthenticated` for good.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Loading,
    Authenticated(Identity),
    Unauthenticated,
}

impl SessionState {
    /// Returns the state that results from applying `event`.
    ///
    /// A failure never sets an identity: it resolves `Loading` to
    /// `Unauthenticated` and leaves any other state untouched.
    #[must_use]
    pub fn apply(self, event: &SessionEvent) -> Self {
        match event {
            SessionEvent::Changed(Some(identity)) => Self::Authenticated(identity.clone()),
            SessionEvent::Changed(None) => Self::Unauthenticated,
            SessionEvent::Failed(_) => match self {
                Self::Loading => Self::Unauthenticated,
                other => other,
            },
        }
    }

    #[cfg(test)]
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Authenticated(_) => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}
