//! Signup endpoint.
//!
//! POST /api/auth/signup - Register a user with the identity provider.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use convoy_types::identity::SignupRequest;

use crate::http::error::AppError;
use crate::http::response::SignupBody;
use crate::state::AppState;

/// POST /api/auth/signup - Create an account.
///
/// Returns `201` with the new user and, when the provider signs the user in
/// immediately, a session. Without a session the user must confirm their
/// email first.
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupBody>), AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let outcome = state.signup_service.register(&request).await?;

    let message = if outcome.session.is_some() {
        "Signup successful"
    } else {
        "Signup successful, check your email to confirm your account"
    };

    Ok((
        StatusCode::CREATED,
        Json(SignupBody {
            message: message.to_string(),
            user: outcome.user,
            session: outcome.session,
        }),
    ))
}
