//! Application services.

mod session_observer;

pub use session_observer::SessionObserver;
