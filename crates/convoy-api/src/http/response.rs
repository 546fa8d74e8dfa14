//! JSON response bodies.

use serde::Serialize;

use convoy_types::conversation::ConversationSummary;
use convoy_types::identity::{AuthSession, AuthUser};

/// `200` body for the conversation endpoints.
#[derive(Debug, Serialize)]
pub struct ConversationsBody {
    pub message: String,
    pub conversations: Vec<ConversationSummary>,
}

/// `201` body for signup. `session` is `null` until the email is confirmed.
#[derive(Debug, Serialize)]
pub struct SignupBody {
    pub message: String,
    pub user: AuthUser,
    pub session: Option<AuthSession>,
}

/// Body of every 4xx response.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// Body of every 5xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
}

/// `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: &'static str,
}
