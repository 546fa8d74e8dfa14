//! Observability for Convoy: the global tracing subscriber.

pub mod tracing_setup;

pub use tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
