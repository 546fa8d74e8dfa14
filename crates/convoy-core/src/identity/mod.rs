//! Identity provider port and the signup flow built on it.

pub mod provider;
pub mod service;

pub use provider::IdentityProvider;
pub use service::SignupService;
