//! HTTP layer for Convoy.
//!
//! Axum router serving the conversation endpoints (default and edge), signup
//! and health, with the edge rewrite applied ahead of routing.

pub mod error;
pub mod handlers;
pub mod response;
pub mod rewrite;
pub mod router;
