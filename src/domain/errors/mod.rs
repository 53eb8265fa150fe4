//! Domain error types.

mod auth_error;
mod init_error;

pub use auth_error::AuthError;
pub use init_error::ProviderInitError;
