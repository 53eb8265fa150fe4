//! Domain services.

mod session_notifier;

pub use session_notifier::SessionNotifier;
