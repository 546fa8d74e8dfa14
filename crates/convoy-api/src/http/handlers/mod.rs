//! HTTP request handlers.

pub mod auth;
pub mod conversations;
pub mod edge;
pub mod health;

use crate::http::error::AppError;

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
