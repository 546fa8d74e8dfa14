//! Access gateway and port trait definitions for Convoy.
//!
//! This crate defines the "ports" (store and identity traits) that the
//! infrastructure layer implements, plus the process-wide access gateway that
//! every conversation read goes through. It depends only on `convoy-types`
//! -- never on `convoy-infra` or any HTTP client.

pub mod conversation;
pub mod identity;
