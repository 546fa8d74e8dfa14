//! GoTrue-compatible identity provider client.
//!
//! Implements `IdentityProvider` from `convoy-core` with
//! `POST {store_url}/auth/v1/signup`. Depending on the provider's
//! confirmation settings the response is either a full session (tokens plus
//! user) or just the new user.

use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use convoy_core::identity::IdentityProvider;
use convoy_types::error::AuthError;
use convoy_types::identity::{AuthSession, AuthUser, SignupOutcome, SignupRequest};

use super::{build_client, truncate_body, with_credential};
use crate::config::EnvConfig;

const SIGNUP_TIMEOUT: Duration = Duration::from_secs(15);

/// Path on the site that confirmation emails link back to.
const CONFIRMATION_PATH: &str = "/auth/callback";

pub struct RestIdentityProvider {
    client: reqwest::Client,
    signup_url: String,
    redirect_to: String,
    api_key: SecretString,
}

impl RestIdentityProvider {
    pub fn new(config: &EnvConfig) -> Result<Self, reqwest::Error> {
        Self::from_parts(
            &config.store_url,
            config.store_key(),
            format!("{}{CONFIRMATION_PATH}", config.site_url),
        )
    }

    pub fn from_parts(
        base_url: &str,
        api_key: SecretString,
        redirect_to: String,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(SIGNUP_TIMEOUT)?,
            signup_url: format!("{}/auth/v1/signup", base_url.trim_end_matches('/')),
            redirect_to,
            api_key,
        })
    }
}

#[derive(Serialize)]
struct SignupPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignupResponse {
    Session(SessionPayload),
    User(AuthUser),
}

#[derive(Deserialize)]
struct SessionPayload {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
    token_type: String,
    user: AuthUser,
}

/// The provider is inconsistent about which field carries the message.
#[derive(Deserialize, Default)]
struct ErrorPayload {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ErrorPayload {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

impl IdentityProvider for RestIdentityProvider {
    async fn sign_up(&self, request: &SignupRequest) -> Result<SignupOutcome, AuthError> {
        let response = with_credential(self.client.post(&self.signup_url), &self.api_key)
            .query(&[("redirect_to", self.redirect_to.as_str())])
            .json(&SignupPayload {
                email: request.email.trim(),
                password: &request.password,
            })
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            let message = response
                .json::<ErrorPayload>()
                .await
                .unwrap_or_default()
                .into_message()
                .unwrap_or_else(|| "signup was rejected".to_string());
            return Err(AuthError::Rejected(message));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Unavailable(format!(
                "identity provider returned status {}: {}",
                status.as_u16(),
                truncate_body(body)
            )));
        }

        let parsed = response
            .json::<SignupResponse>()
            .await
            .map_err(|e| AuthError::Unavailable(format!("undecodable signup response: {e}")))?;

        Ok(match parsed {
            SignupResponse::Session(session) => SignupOutcome {
                user: session.user,
                session: Some(AuthSession {
                    access_token: session.access_token,
                    refresh_token: session.refresh_token,
                    expires_in: session.expires_in,
                    token_type: session.token_type,
                }),
            },
            SignupResponse::User(user) => SignupOutcome {
                user,
                session: None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> RestIdentityProvider {
        RestIdentityProvider::from_parts(
            base_url,
            SecretString::from("test-key"),
            "https://app.example.com/auth/callback".to_string(),
        )
        .unwrap()
    }

    fn request() -> SignupRequest {
        SignupRequest {
            email: " ada@example.com ".to_string(),
            password: "hunter22".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_with_immediate_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .and(query_param("redirect_to", "https://app.example.com/auth/callback"))
            .and(header("apikey", "test-key"))
            .and(body_json(json!({"email": "ada@example.com", "password": "hunter22"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at",
                "refresh_token": "rt",
                "expires_in": 3600,
                "token_type": "bearer",
                "user": {"id": "user-1", "email": "ada@example.com", "aud": "authenticated"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = provider(&server.uri()).sign_up(&request()).await.unwrap();

        assert_eq!(outcome.user.id, "user-1");
        let session = outcome.session.unwrap();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.expires_in, 3600);
    }

    #[tokio::test]
    async fn test_sign_up_pending_confirmation_has_no_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "user-2",
                "email": "ada@example.com",
                "confirmation_sent_at": "2025-03-01T10:00:00Z"
            })))
            .mount(&server)
            .await;

        let outcome = provider(&server.uri()).sign_up(&request()).await.unwrap();

        assert_eq!(outcome.user.id, "user-2");
        assert!(outcome.session.is_none());
    }

    #[tokio::test]
    async fn test_client_error_is_rejection_with_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": 422,
                "msg": "User already registered"
            })))
            .mount(&server)
            .await;

        let err = provider(&server.uri()).sign_up(&request()).await.unwrap_err();
        match err {
            AuthError::Rejected(msg) => assert_eq!(msg, "User already registered"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejection_without_body_uses_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let err = provider(&server.uri()).sign_up(&request()).await.unwrap_err();
        assert!(matches!(err, AuthError::Rejected(msg) if msg == "signup was rejected"));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = provider(&server.uri()).sign_up(&request()).await.unwrap_err();
        assert!(matches!(err, AuthError::Unavailable(_)));
    }
}
