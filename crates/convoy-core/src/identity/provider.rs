//! IdentityProvider trait definition.

use convoy_types::error::AuthError;
use convoy_types::identity::{SignupOutcome, SignupRequest};

/// External identity provider that owns users and sessions.
///
/// Implementations live in convoy-infra (e.g., `RestIdentityProvider`).
pub trait IdentityProvider: Send + Sync {
    /// Create a user and, when the provider allows it, issue a session.
    fn sign_up(
        &self,
        request: &SignupRequest,
    ) -> impl std::future::Future<Output = Result<SignupOutcome, AuthError>> + Send;
}
