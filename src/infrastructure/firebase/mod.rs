//! Firebase Authentication adapter.

mod app;
mod client;
mod dto;
mod firestore;
mod session;

pub use app::FirebaseApp;
pub use client::{FirebaseSession, IdentityToolkitClient};
pub use firestore::FirestoreHandle;
pub use session::FirebaseSessionProvider;
