//! Application error type mapping to HTTP status codes and JSON bodies.
//!
//! Client errors carry `{ "message" }`. Server errors carry `{ "message",
//! "error" }`, where `error` is a fixed description of the failure class and
//! never the underlying cause.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use convoy_types::error::{AuthError, DataAccessError, GatewayError, SignupError, ValidationError};

use super::response::{ErrorBody, MessageBody};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Malformed client input.
    Validation(ValidationError),
    /// The query string, a header or the body could not be decoded.
    BadRequest(String),
    /// Conversation read failed.
    DataAccess(DataAccessError),
    /// Identity provider failure.
    Auth(AuthError),
    MethodNotAllowed,
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Validation(e) => AppError::Validation(e),
            GatewayError::DataAccess(e) => AppError::DataAccess(e),
        }
    }
}

impl From<SignupError> for AppError {
    fn from(e: SignupError) -> Self {
        match e {
            SignupError::Validation(e) => AppError::Validation(e),
            SignupError::Auth(e) => AppError::Auth(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(e) => client_error(StatusCode::BAD_REQUEST, e.to_string()),
            AppError::BadRequest(msg) => client_error(StatusCode::BAD_REQUEST, msg),
            AppError::Auth(AuthError::Rejected(msg)) => {
                client_error(StatusCode::BAD_REQUEST, msg)
            }
            AppError::MethodNotAllowed => {
                client_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
            }
            AppError::DataAccess(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: "Failed to load conversations".to_string(),
                    error: e.kind().describe().to_string(),
                }),
            )
                .into_response(),
            AppError::Auth(AuthError::Unavailable(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: "Failed to sign up".to_string(),
                    error: "identity provider is unavailable".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

fn client_error(status: StatusCode, message: String) -> Response {
    (status, Json(MessageBody { message })).into_response()
}
