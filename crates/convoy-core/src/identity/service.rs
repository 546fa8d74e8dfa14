//! Signup service: input validation in front of the identity provider.

use tracing::{error, info, warn};

use convoy_types::error::{AuthError, SignupError};
use convoy_types::identity::{SignupOutcome, SignupRequest};

use super::provider::IdentityProvider;

/// Registers new users through an [`IdentityProvider`].
pub struct SignupService<P: IdentityProvider> {
    provider: P,
}

impl<P: IdentityProvider> SignupService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Validate the credentials and register the user.
    ///
    /// Malformed input never reaches the provider.
    pub async fn register(&self, request: &SignupRequest) -> Result<SignupOutcome, SignupError> {
        if let Err(err) = request.validate() {
            warn!(error = %err, "Rejected signup request");
            return Err(err.into());
        }

        match self.provider.sign_up(request).await {
            Ok(outcome) => {
                info!(
                    user_id = %outcome.user.id,
                    session_issued = outcome.session.is_some(),
                    "User signed up"
                );
                Ok(outcome)
            }
            Err(err @ AuthError::Rejected(_)) => {
                warn!(error = %err, "Identity provider rejected signup");
                Err(err.into())
            }
            Err(err) => {
                error!(error = %err, "Signup failed");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use convoy_types::identity::{AuthSession, AuthUser};

    struct FakeProvider {
        calls: AtomicUsize,
        reject_with: Option<String>,
    }

    impl FakeProvider {
        fn accepting() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reject_with: None,
            }
        }

        fn rejecting(msg: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reject_with: Some(msg.to_string()),
            }
        }
    }

    impl IdentityProvider for FakeProvider {
        async fn sign_up(&self, request: &SignupRequest) -> Result<SignupOutcome, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(msg) = &self.reject_with {
                return Err(AuthError::Rejected(msg.clone()));
            }
            Ok(SignupOutcome {
                user: AuthUser {
                    id: "user-1".to_string(),
                    email: Some(request.email.clone()),
                },
                session: Some(AuthSession {
                    access_token: "access".to_string(),
                    refresh_token: "refresh".to_string(),
                    expires_in: 3600,
                    token_type: "bearer".to_string(),
                }),
            })
        }
    }

    fn request(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_returns_provider_outcome() {
        let service = SignupService::new(FakeProvider::accepting());

        let outcome = service
            .register(&request("ada@example.com", "hunter22"))
            .await
            .unwrap();

        assert_eq!(outcome.user.email.as_deref(), Some("ada@example.com"));
        assert!(outcome.session.is_some());
    }

    #[tokio::test]
    async fn test_invalid_input_skips_provider() {
        let service = SignupService::new(FakeProvider::accepting());

        let err = service.register(&request("ada", "hunter22")).await.unwrap_err();

        assert!(matches!(err, SignupError::Validation(_)));
        assert_eq!(service.provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_rejection_is_passed_through() {
        let service = SignupService::new(FakeProvider::rejecting("User already registered"));

        let err = service
            .register(&request("ada@example.com", "hunter22"))
            .await
            .unwrap_err();

        match err {
            SignupError::Auth(AuthError::Rejected(msg)) => {
                assert_eq!(msg, "User already registered")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
