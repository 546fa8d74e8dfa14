//! Axum router configuration with middleware.
//!
//! The edge rewrite runs as middleware wrapped around the inner router, so it
//! sees (and may replace) the URI before any route is matched. CORS and
//! request tracing wrap the whole stack.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use convoy_types::config::{DEFAULT_CONVERSATIONS_PATH, EDGE_CONVERSATIONS_PATH};

use crate::http::handlers::{self, auth, conversations, edge, health};
use crate::http::rewrite;
use crate::state::AppState;

pub const HEALTH_PATH: &str = "/health";

pub const SIGNUP_PATH: &str = "/api/auth/signup";

/// Routes a rewrite target may not replace.
pub const RESERVED_PATHS: &[&str] = &[HEALTH_PATH, SIGNUP_PATH, DEFAULT_CONVERSATIONS_PATH];

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let rewrites = Arc::clone(&state.rewrites);

    let mut routes = Router::new()
        .route(
            DEFAULT_CONVERSATIONS_PATH,
            get(conversations::list_conversations).fallback(handlers::method_not_allowed),
        )
        .route(
            EDGE_CONVERSATIONS_PATH,
            get(edge::list_conversations).fallback(handlers::method_not_allowed),
        )
        .route(
            SIGNUP_PATH,
            post(auth::sign_up).fallback(handlers::method_not_allowed),
        )
        .route(HEALTH_PATH, get(health::health_check));

    // Additional targets from config are served by the edge handler too.
    for target in rewrites.targets() {
        if target != EDGE_CONVERSATIONS_PATH {
            routes = routes.route(
                target,
                get(edge::list_conversations).fallback(handlers::method_not_allowed),
            );
        }
    }

    let dispatch = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(
            Arc::clone(&rewrites),
            rewrite::rewrite_request,
        ))
        .service(routes.with_state(state));

    Router::new()
        .fallback_service(dispatch)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
