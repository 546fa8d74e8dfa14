//! Shared domain types for Convoy.
//!
//! This crate contains the types passed between the gateway, the store and
//! identity adapters, and the HTTP layer: project identifiers, conversation
//! summaries, signup payloads, server configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod conversation;
pub mod error;
pub mod identity;
