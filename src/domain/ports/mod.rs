mod identity_provider_port;
mod session_provider_port;
mod token_storage_port;

#[cfg(test)]
pub use identity_provider_port::MockIdentityProviderPort;
pub use identity_provider_port::{DevicePrompt, IdentityProviderPort, IdpCredential};
pub use session_provider_port::{SessionClient, SessionProviderPort, SessionSubscription};
pub use token_storage_port::TokenStoragePort;

#[cfg(test)]
pub mod mocks {
    pub use super::session_provider_port::mock::MockSessionProvider;
    pub use super::token_storage_port::mock::MockTokenStorage;
}
