//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Firebase Authentication and Firestore.
pub mod firebase;
/// Google identity provider.
pub mod google;
pub mod http;
/// Token storage adapters.
pub mod storage;

pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use firebase::{FirebaseApp, FirebaseSessionProvider};
pub use google::GoogleDeviceAuthorizer;
pub use storage::{KeyringTokenStorage, MemoryTokenStorage};
