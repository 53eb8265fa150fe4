//! Firebase project initialization.

use tracing::{debug, info};

use super::client::IdentityToolkitClient;
use super::firestore::FirestoreHandle;
use crate::domain::errors::ProviderInitError;
use crate::infrastructure::config::FirebaseConfig;
use crate::infrastructure::http::build_client;

/// Initialized Firebase project: auth client plus database handle.
#[derive(Clone)]
pub struct FirebaseApp {
    auth: IdentityToolkitClient,
    firestore: FirestoreHandle,
}

impl FirebaseApp {
    /// Validates `config` and creates the project clients.
    ///
    /// # Errors
    /// Returns [`ProviderInitError`] if a required value is missing or
    /// malformed, or if the HTTP client cannot be created.
    pub fn initialize(config: &FirebaseConfig) -> Result<Self, ProviderInitError> {
        validate(config)?;

        let auth = IdentityToolkitClient::new(
            build_client()?,
            config.api_key.trim(),
            config.auth_domain.trim(),
            config.identity_toolkit_url.as_str(),
            config.secure_token_url.as_str(),
        );
        let firestore = FirestoreHandle::new(config.project_id.trim());

        info!(
            project_id = %firestore.project_id(),
            database = %firestore.database_path(),
            "Firebase app, auth and Firestore initialized"
        );

        Ok(Self { auth, firestore })
    }

    #[must_use]
    pub const fn auth(&self) -> &IdentityToolkitClient {
        &self.auth
    }

    #[must_use]
    pub const fn firestore(&self) -> &FirestoreHandle {
        &self.firestore
    }
}

fn validate(config: &FirebaseConfig) -> Result<(), ProviderInitError> {
    let required = [
        ("firebase.api_key", &config.api_key),
        ("firebase.auth_domain", &config.auth_domain),
        ("firebase.project_id", &config.project_id),
        ("firebase.storage_bucket", &config.storage_bucket),
        ("firebase.messaging_sender_id", &config.messaging_sender_id),
        ("firebase.app_id", &config.app_id),
    ];

    for (key, value) in required {
        let value = value.trim();
        if value.is_empty() {
            return Err(ProviderInitError::MissingKey { key });
        }
        if value.contains(char::is_whitespace) {
            return Err(ProviderInitError::invalid(key, "must not contain whitespace"));
        }
    }

    if config.auth_domain.contains('/') {
        return Err(ProviderInitError::invalid(
            "firebase.auth_domain",
            "expected a host name such as `project.firebaseapp.com`",
        ));
    }

    for (key, url) in [
        ("firebase.identity_toolkit_url", &config.identity_toolkit_url),
        ("firebase.secure_token_url", &config.secure_token_url),
    ] {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ProviderInitError::invalid(key, "expected an http(s) URL"));
        }
    }

    debug!("Firebase configuration validated");
    Ok(())
}
