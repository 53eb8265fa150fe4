//! Domain layer with core entities, errors, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// User-visible notifications.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Domain services.
pub mod services;

pub use entities::{Identity, SecretToken, SessionEvent, SessionState};
pub use errors::{AuthError, ProviderInitError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{SessionClient, SessionProviderPort, TokenStoragePort};
