//! Google sign-in using the OAuth 2.0 device authorization grant.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::dto::{DeviceCodeResponse, ErrorResponse, TokenResponse};
use crate::domain::entities::SecretToken;
use crate::domain::errors::{AuthError, ProviderInitError};
use crate::domain::ports::{DevicePrompt, IdentityProviderPort, IdpCredential};
use crate::infrastructure::config::GoogleConfig;
use crate::infrastructure::http::{build_client, request_error};

const PROVIDER_ID: &str = "google.com";
const SCOPES: &str = "openid email profile";
const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";
const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);

#[derive(Debug, PartialEq, Eq)]
enum PollOutcome {
    Approved(SecretToken),
    Pending,
    SlowDown,
    Failed(AuthError),
}

/// Google identity provider for terminals.
///
/// The user approves the sign-in in a browser on any device; the verification
/// URL and code are sent to `prompts` for display.
pub struct GoogleDeviceAuthorizer {
    client: Client,
    client_id: String,
    client_secret: String,
    device_code_url: String,
    token_url: String,
    open_browser: bool,
    prompts: mpsc::UnboundedSender<DevicePrompt>,
}

impl GoogleDeviceAuthorizer {
    /// Creates authorizer from configuration.
    ///
    /// # Errors
    /// Returns error if no OAuth client ID is configured or the HTTP client
    /// cannot be created.
    pub fn new(
        config: &GoogleConfig,
        prompts: mpsc::UnboundedSender<DevicePrompt>,
    ) -> Result<Self, ProviderInitError> {
        let client_id = config.client_id.trim();
        if client_id.is_empty() {
            return Err(ProviderInitError::MissingKey {
                key: "google.client_id",
            });
        }

        Ok(Self {
            client: build_client()?,
            client_id: client_id.to_string(),
            client_secret: config.client_secret.trim().to_string(),
            device_code_url: config.device_code_url.clone(),
            token_url: config.token_url.clone(),
            open_browser: config.open_browser,
            prompts,
        })
    }

    async fn request_device_code(&self) -> Result<DeviceCodeResponse, AuthError> {
        let response = self
            .client
            .post(&self.device_code_url)
            .form(&[("client_id", self.client_id.as_str()), ("scope", SCOPES)])
            .send()
            .await
            .map_err(|e| request_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(error) => error.error,
                Err(_) => format!("HTTP {status}"),
            };
            warn!(%status, message = %message, "Device code request failed");
            return Err(AuthError::rejected(message));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::invalid_response(format!("failed to parse device code: {e}")))
    }

    async fn poll_token(&self, device_code: &str) -> Result<PollOutcome, AuthError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("device_code", device_code),
                ("grant_type", DEVICE_GRANT_TYPE),
            ])
            .send()
            .await
            .map_err(|e| request_error(&e))?;

        let success = response.status().is_success();
        let body = response.text().await.map_err(|e| request_error(&e))?;
        Ok(poll_outcome(success, &body))
    }

    fn announce(&self, prompt: DevicePrompt) {
        if self.open_browser {
            if let Err(e) = opener::open_browser(&prompt.verification_url) {
                warn!(error = %e, "Failed to open browser for Google sign-in");
            }
        }
        if self.prompts.send(prompt).is_err() {
            debug!("No one is listening for sign-in prompts");
        }
    }
}

fn poll_outcome(success: bool, body: &str) -> PollOutcome {
    if success {
        return match serde_json::from_str::<TokenResponse>(body) {
            Ok(TokenResponse {
                id_token: Some(id_token),
            }) => SecretToken::new(id_token).map_or_else(
                || PollOutcome::Failed(AuthError::invalid_response("empty id_token")),
                PollOutcome::Approved,
            ),
            Ok(_) => PollOutcome::Failed(AuthError::invalid_response(
                "token response has no id_token, is the openid scope allowed?",
            )),
            Err(e) => PollOutcome::Failed(AuthError::invalid_response(e.to_string())),
        };
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error) => match error.error.as_str() {
            "authorization_pending" => PollOutcome::Pending,
            "slow_down" => PollOutcome::SlowDown,
            "access_denied" => PollOutcome::Failed(AuthError::rejected("access denied by user")),
            "expired_token" => PollOutcome::Failed(AuthError::HandshakeExpired),
            other => PollOutcome::Failed(AuthError::rejected(
                error
                    .error_description
                    .unwrap_or_else(|| other.to_string()),
            )),
        },
        Err(_) => PollOutcome::Failed(AuthError::invalid_response(format!(
            "unexpected token endpoint response: {body}"
        ))),
    }
}

#[async_trait]
impl IdentityProviderPort for GoogleDeviceAuthorizer {
    async fn authorize(&self) -> Result<IdpCredential, AuthError> {
        let device = self.request_device_code().await?;
        let mut interval = Duration::from_secs(device.interval.max(1));

        info!(
            verification_url = %device.verification_url,
            expires_in = device.expires_in,
            "Waiting for Google sign-in approval"
        );
        self.announce(DevicePrompt {
            verification_url: device.verification_url.clone(),
            user_code: device.user_code.clone(),
            expires_in: device.expires_in,
        });

        loop {
            tokio::time::sleep(interval).await;

            match self.poll_token(&device.device_code).await? {
                PollOutcome::Approved(id_token) => {
                    info!("Google sign-in approved");
                    return Ok(IdpCredential {
                        provider_id: PROVIDER_ID.to_string(),
                        id_token,
                    });
                }
                PollOutcome::Pending => debug!("Google sign-in still pending"),
                PollOutcome::SlowDown => {
                    interval += SLOW_DOWN_STEP;
                    debug!(interval_secs = interval.as_secs(), "Slowing down token polling");
                }
                PollOutcome::Failed(e) => {
                    warn!(error = %e, "Google sign-in failed");
                    return Err(e);
                }
            }
        }
    }
}
