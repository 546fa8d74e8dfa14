//! Edge conversation handler.
//!
//! GET /api/edge/projects/conversations - Target of the edge rewrite. Serves
//! the same read as the default handler; it only differs in where it sits in
//! the routing topology.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, Request, State};
use axum::response::Response;
use tracing::debug;

use crate::http::handlers::conversations::{self, ConversationQuery, HandlerKind};
use crate::http::rewrite::RewrittenFrom;
use crate::state::AppState;

/// GET /api/edge/projects/conversations - Edge handler.
pub async fn list_conversations(
    State(state): State<AppState>,
    query: Result<Query<ConversationQuery>, QueryRejection>,
    request: Request,
) -> Response {
    let (parts, _body) = request.into_parts();
    if let Some(RewrittenFrom(original)) = parts.extensions.get::<RewrittenFrom>() {
        debug!(original = %original, "Serving rewritten request");
    }

    conversations::serve(&state, HandlerKind::Edge, &parts.headers, query).await
}
