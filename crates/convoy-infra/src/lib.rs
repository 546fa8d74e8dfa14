//! Infrastructure layer for Convoy.
//!
//! Contains implementations of the port traits defined in `convoy-core`:
//! a PostgREST-compatible conversation store client and a GoTrue-compatible
//! identity provider client, plus environment and file configuration loading.

pub mod config;
pub mod rest;
