//! Firebase Auth REST client.

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::{
    ErrorResponse, LookupRequest, LookupResponse, RefreshTokenResponse, SignInWithIdpRequest,
    SignInWithIdpResponse, UserRecord,
};
use crate::domain::entities::{Identity, SecretToken};
use crate::domain::errors::AuthError;
use crate::domain::ports::IdpCredential;
use crate::infrastructure::http::request_error;

/// Signed-in session as issued by Firebase.
#[derive(Debug, Clone)]
pub struct FirebaseSession {
    pub identity: Identity,
    pub refresh_token: SecretToken,
}

/// Client for the Identity Toolkit and Secure Token endpoints.
#[derive(Clone)]
pub struct IdentityToolkitClient {
    client: Client,
    api_key: String,
    identity_toolkit_url: String,
    secure_token_url: String,
    request_uri: String,
}

impl IdentityToolkitClient {
    #[must_use]
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        auth_domain: &str,
        identity_toolkit_url: impl Into<String>,
        secure_token_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            identity_toolkit_url: identity_toolkit_url.into().trim_end_matches('/').to_string(),
            secure_token_url: secure_token_url.into().trim_end_matches('/').to_string(),
            request_uri: format!("https://{auth_domain}"),
        }
    }

    fn accounts_url(&self, method: &str) -> String {
        format!("{}/accounts:{method}", self.identity_toolkit_url)
    }

    /// Exchanges a federated credential for a Firebase session.
    ///
    /// # Errors
    /// Returns error if the request fails or Firebase rejects the credential.
    pub async fn sign_in_with_idp(
        &self,
        credential: &IdpCredential,
    ) -> Result<FirebaseSession, AuthError> {
        debug!(provider = %credential.provider_id, "Exchanging identity provider credential");

        let request = SignInWithIdpRequest {
            post_body: format!(
                "id_token={}&providerId={}",
                credential.id_token.as_str(),
                credential.provider_id
            ),
            request_uri: self.request_uri.clone(),
            return_secure_token: true,
            return_idp_credential: true,
        };

        let response = self
            .client
            .post(self.accounts_url("signInWithIdp"))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| request_error(&e))?;

        let body: SignInWithIdpResponse = Self::parse(response).await?;

        let identity = identity_from(UserRecord {
            local_id: body.local_id,
            email: body.email,
            display_name: body.display_name,
        });
        debug!(uid = %identity.uid(), "Firebase sign-in succeeded");

        Ok(FirebaseSession {
            identity,
            refresh_token: Self::token(body.refresh_token, "refreshToken")?,
        })
    }

    /// Trades a refresh token for a fresh session and reloads the profile.
    ///
    /// # Errors
    /// Returns [`AuthError::SessionRevoked`] if Firebase no longer accepts the
    /// refresh token, or a network error.
    pub async fn restore_session(
        &self,
        refresh_token: &SecretToken,
    ) -> Result<FirebaseSession, AuthError> {
        let refreshed = self.refresh(refresh_token).await?;
        let id_token = Self::token(refreshed.id_token, "id_token")?;
        let identity = self.lookup(&id_token).await?;

        if identity.uid().as_str() != refreshed.user_id {
            return Err(AuthError::invalid_response(
                "refreshed token belongs to a different user",
            ));
        }

        Ok(FirebaseSession {
            identity,
            refresh_token: Self::token(refreshed.refresh_token, "refresh_token")?,
        })
    }

    async fn refresh(&self, refresh_token: &SecretToken) -> Result<RefreshTokenResponse, AuthError> {
        debug!("Refreshing Firebase session");

        let response = self
            .client
            .post(format!("{}/token", self.secure_token_url))
            .query(&[("key", self.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| request_error(&e))?;

        Self::parse(response).await
    }

    async fn lookup(&self, id_token: &SecretToken) -> Result<Identity, AuthError> {
        let response = self
            .client
            .post(self.accounts_url("lookup"))
            .query(&[("key", self.api_key.as_str())])
            .json(&LookupRequest {
                id_token: id_token.as_str(),
            })
            .send()
            .await
            .map_err(|e| request_error(&e))?;

        let body: LookupResponse = Self::parse(response).await?;

        body.users
            .into_iter()
            .next()
            .map(identity_from)
            .ok_or_else(|| AuthError::revoked("user record not found"))
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AuthError> {
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(error) => error.error.message,
                Err(_) => format!("HTTP {status}"),
            };
            warn!(%status, message = %message, "Firebase Auth returned an error");
            return Err(classify_error(status, &message));
        }

        response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse Firebase Auth response");
            AuthError::invalid_response(format!("failed to parse response: {e}"))
        })
    }

    fn token(value: String, field: &str) -> Result<SecretToken, AuthError> {
        SecretToken::new(value)
            .ok_or_else(|| AuthError::invalid_response(format!("missing {field} in response")))
    }
}

fn identity_from(record: UserRecord) -> Identity {
    let mut identity = Identity::new(record.local_id);
    if let Some(display_name) = record.display_name {
        identity = identity.with_display_name(display_name);
    }
    if let Some(email) = record.email {
        identity = identity.with_email(email);
    }
    identity
}

/// Maps a Firebase error message (`CODE` or `CODE : detail`) to an error.
fn classify_error(status: StatusCode, message: &str) -> AuthError {
    let code = message.split([' ', ':']).next().unwrap_or_default();

    match code {
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" | "INVALID_ID_TOKEN"
        | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => AuthError::revoked(message),
        "USER_DISABLED" | "INVALID_IDP_RESPONSE" | "OPERATION_NOT_ALLOWED" | "API_KEY_INVALID"
        | "INVALID_GRANT_TYPE" => AuthError::rejected(message),
        "TOO_MANY_ATTEMPTS_TRY_LATER" | "QUOTA_EXCEEDED" => AuthError::RateLimited,
        _ if message.starts_with("API key not valid") => AuthError::rejected("invalid API key"),
        _ => match status {
            StatusCode::TOO_MANY_REQUESTS => AuthError::RateLimited,
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                AuthError::network("Firebase Auth is temporarily unavailable")
            }
            _ => AuthError::unexpected(format!("unexpected response: {status} - {message}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    use crate::infrastructure::http::build_client;

    #[test_case(StatusCode::BAD_REQUEST, "TOKEN_EXPIRED" ; "expired refresh token")]
    #[test_case(StatusCode::BAD_REQUEST, "INVALID_REFRESH_TOKEN" ; "invalid refresh token")]
    #[test_case(StatusCode::BAD_REQUEST, "USER_NOT_FOUND" ; "deleted user")]
    fn test_revoked_session_codes(status: StatusCode, message: &str) {
        assert!(matches!(
            classify_error(status, message),
            AuthError::SessionRevoked { .. }
        ));
    }

    #[test_case("USER_DISABLED" ; "disabled user")]
    #[test_case("INVALID_IDP_RESPONSE : Invalid Idp Response" ; "bad idp token with detail")]
    #[test_case("API key not valid. Please pass a valid API key." ; "bad api key")]
    fn test_rejected_codes(message: &str) {
        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, message),
            AuthError::Rejected { .. }
        ));
    }

    #[test]
    fn test_rate_limit_codes() {
        assert_eq!(
            classify_error(StatusCode::BAD_REQUEST, "TOO_MANY_ATTEMPTS_TRY_LATER"),
            AuthError::RateLimited
        );
        assert_eq!(
            classify_error(StatusCode::TOO_MANY_REQUESTS, "HTTP 429"),
            AuthError::RateLimited
        );
    }

    #[test]
    fn test_unknown_code_by_status() {
        assert!(classify_error(StatusCode::SERVICE_UNAVAILABLE, "HTTP 503").is_network_error());
        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, "SOMETHING_NEW"),
            AuthError::Unexpected { .. }
        ));
    }

    #[test]
    fn test_identity_from_record() {
        let record: UserRecord = serde_json::from_str(
            r#"{"localId":"u1","email":"taro@example.com","displayName":"Taro","emailVerified":true}"#,
        )
        .unwrap();

        let identity = identity_from(record);

        assert_eq!(identity.uid().as_str(), "u1");
        assert_eq!(identity.label(), "Taro");
        assert_eq!(identity.email(), Some("taro@example.com"));
    }

    #[test]
    fn test_refresh_response_is_snake_case() {
        let body: RefreshTokenResponse = serde_json::from_str(
            r#"{"id_token":"id","refresh_token":"rt","user_id":"u1","expires_in":"3600","token_type":"Bearer"}"#,
        )
        .unwrap();

        assert_eq!(body.user_id, "u1");
        assert_eq!(body.refresh_token, "rt");
    }

    #[test]
    fn test_error_response_shape() {
        let body: ErrorResponse = serde_json::from_str(
            r#"{"error":{"code":400,"message":"INVALID_IDP_RESPONSE","errors":[]}}"#,
        )
        .unwrap();

        assert_eq!(body.error.code, 400);
        assert_eq!(body.error.message, "INVALID_IDP_RESPONSE");
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let client = IdentityToolkitClient::new(
            build_client().unwrap(),
            "key",
            "demo.firebaseapp.com",
            "http://localhost:9099/identitytoolkit.googleapis.com/v1/",
            "http://localhost:9099/securetoken.googleapis.com/v1/",
        );

        assert_eq!(
            client.accounts_url("lookup"),
            "http://localhost:9099/identitytoolkit.googleapis.com/v1/accounts:lookup"
        );
        assert_eq!(client.request_uri, "https://demo.firebaseapp.com");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = IdentityToolkitClient::new(
            build_client().unwrap(),
            "key",
            "demo.firebaseapp.com",
            "http://127.0.0.1:9",
            "http://127.0.0.1:9",
        );

        let result = client
            .restore_session(&SecretToken::new_unchecked("refresh-token"))
            .await;

        assert!(result.is_err_and(|e| e.is_network_error()));
    }
}
