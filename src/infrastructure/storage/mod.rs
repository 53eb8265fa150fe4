//! Refresh token storage adapters.

mod keyring_storage;
mod memory_storage;

pub use keyring_storage::KeyringTokenStorage;
pub use memory_storage::MemoryTokenStorage;
