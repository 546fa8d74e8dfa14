//! Conversation listing handlers.
//!
//! Endpoints:
//! - GET /api/projects/conversations?projectId=<id>      - Default handler
//! - GET /api/edge/projects/conversations?projectId=<id> - Edge handler (see `edge`)
//!
//! Both make exactly one gateway read per request and share the response
//! shape. Responses carry `x-convoy-handler` naming the handler that ran.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::Instrument;
use uuid::Uuid;

use convoy_core::conversation::ReadOptions;
use convoy_types::config::GatewayConfig;
use convoy_types::conversation::ConversationSummary;
use convoy_types::error::ValidationError;

use crate::http::error::AppError;
use crate::http::response::ConversationsBody;
use crate::state::AppState;

/// Names the handler that produced a response.
pub const HANDLER_HEADER: HeaderName = HeaderName::from_static("x-convoy-handler");

/// Optional per-request read deadline in milliseconds.
pub const TIMEOUT_HEADER: HeaderName = HeaderName::from_static("x-request-timeout-ms");

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Default,
    Edge,
}

impl HandlerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HandlerKind::Default => "default",
            HandlerKind::Edge => "edge",
        }
    }
}

/// GET /api/projects/conversations - Default handler.
pub async fn list_conversations(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ConversationQuery>, QueryRejection>,
) -> Response {
    serve(&state, HandlerKind::Default, &headers, query).await
}

/// Run one conversation read and render it, tagged with `kind`.
pub(crate) async fn serve(
    state: &AppState,
    kind: HandlerKind,
    headers: &HeaderMap,
    query: Result<Query<ConversationQuery>, QueryRejection>,
) -> Response {
    let request_id = Uuid::now_v7();
    let span = tracing::info_span!("conversations", handler = kind.as_str(), %request_id);

    let mut response = match load(state, headers, query).instrument(span).await {
        Ok(conversations) => Json(ConversationsBody {
            message: "Conversations retrieved successfully".to_string(),
            conversations,
        })
        .into_response(),
        Err(err) => err.into_response(),
    };

    response
        .headers_mut()
        .insert(HANDLER_HEADER, HeaderValue::from_static(kind.as_str()));
    response
}

async fn load(
    state: &AppState,
    headers: &HeaderMap,
    query: Result<Query<ConversationQuery>, QueryRejection>,
) -> Result<Vec<ConversationSummary>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let project_id = query
        .project_id
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingProjectId)?;

    let options = read_options(headers, &state.gateway_config)?;

    Ok(state
        .gateway
        .get_project_conversations_with(&project_id, options)
        .await?)
}

/// Translate the timeout header, clamped to the configured maximum.
fn read_options(headers: &HeaderMap, config: &GatewayConfig) -> Result<ReadOptions, AppError> {
    let Some(value) = headers.get(&TIMEOUT_HEADER) else {
        return Ok(ReadOptions::default());
    };

    let millis = value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .ok_or_else(|| {
            AppError::BadRequest(format!("{TIMEOUT_HEADER} must be a positive integer"))
        })?;

    Ok(ReadOptions::default().with_timeout(config.clamp_timeout(millis)))
}
