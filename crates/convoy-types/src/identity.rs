//! Signup payloads exchanged with the identity provider.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Shortest password the identity provider accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Credentials submitted to the signup endpoint.
#[derive(Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl SignupRequest {
    /// Check the shape of the credentials before involving the provider.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::InvalidSignup("email is required".to_string()));
        }
        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
            _ => {
                return Err(ValidationError::InvalidSignup(
                    "email address is malformed".to_string(),
                ));
            }
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::InvalidSignup(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// A user account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens issued for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub token_type: String,
}

/// Result of a successful signup.
///
/// `session` is `None` when the provider requires email confirmation before
/// issuing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupOutcome {
    pub user: AuthUser,
    pub session: Option<AuthSession>,
}
