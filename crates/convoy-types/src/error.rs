use std::error::Error as StdError;

use thiserror::Error;

/// Caller supplied input that cannot be acted on. Always a client error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Project ID is required")]
    MissingProjectId,

    #[error("invalid project id: {0}")]
    InvalidProjectId(String),

    #[error("invalid signup request: {0}")]
    InvalidSignup(String),
}

/// Why a conversation read could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataAccessKind {
    /// The store could not be reached or refused the request.
    Unavailable,
    /// The store answered with data that does not fit the contract.
    Malformed,
    /// The read ran past its deadline or the caller cancelled it.
    Timeout,
}

impl DataAccessKind {
    /// Stable machine-readable name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataAccessKind::Unavailable => "unavailable",
            DataAccessKind::Malformed => "malformed",
            DataAccessKind::Timeout => "timeout",
        }
    }

    /// Human-readable description that is safe to show to end users.
    pub fn describe(&self) -> &'static str {
        match self {
            DataAccessKind::Unavailable => "conversation store is unavailable",
            DataAccessKind::Malformed => "conversation store returned an invalid response",
            DataAccessKind::Timeout => "conversation read timed out",
        }
    }
}

/// The single failure shape the gateway hands back for store problems.
///
/// `message` is meant for logs. The underlying store error, if any, is kept
/// as the [`source`](StdError::source) and never rendered to clients.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DataAccessError {
    kind: DataAccessKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl DataAccessError {
    pub fn new(kind: DataAccessKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(DataAccessKind::Timeout, message)
    }

    /// Attach the error that caused this one.
    pub fn with_source(mut self, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> DataAccessKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by the access gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
}

/// Errors from store adapters (used by the port traits in convoy-core).
///
/// These never leave the gateway; it normalizes them into [`DataAccessError`]
/// or, for [`StoreError::NotFound`], an empty result.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store request timed out")]
    Timeout,

    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode store response: {0}")]
    Decode(String),

    #[error("no data found")]
    NotFound,
}

/// Errors from the identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider understood the request and declined it (duplicate user,
    /// weak password, signups disabled).
    #[error("{0}")]
    Rejected(String),

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the signup flow.
#[derive(Debug, Error)]
pub enum SignupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Startup configuration problems. All of these are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("invalid rewrite rule: {0}")]
    InvalidRoute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingProjectId.to_string(),
            "Project ID is required"
        );
        let err = ValidationError::InvalidProjectId("too long".to_string());
        assert_eq!(err.to_string(), "invalid project id: too long");
    }

    #[test]
    fn test_data_access_error_keeps_source() {
        let err = DataAccessError::new(DataAccessKind::Unavailable, "store down")
            .with_source(StoreError::Connection("connection refused".to_string()));

        assert_eq!(err.kind(), DataAccessKind::Unavailable);
        assert_eq!(err.to_string(), "store down");
        let source = err.source().unwrap().to_string();
        assert!(source.contains("connection refused"));
    }

    #[test]
    fn test_data_access_kind_description_hides_details() {
        for kind in [
            DataAccessKind::Unavailable,
            DataAccessKind::Malformed,
            DataAccessKind::Timeout,
        ] {
            assert!(!kind.describe().is_empty());
            assert!(!kind.describe().contains("status"));
        }
    }

    #[test]
    fn test_gateway_error_is_transparent() {
        let err: GatewayError = ValidationError::MissingProjectId.into();
        assert_eq!(err.to_string(), "Project ID is required");

        let err: GatewayError = DataAccessError::timeout("read exceeded 10ms").into();
        assert_eq!(err.to_string(), "read exceeded 10ms");
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Status {
            status: 503,
            body: "upstream".to_string(),
        };
        assert_eq!(err.to_string(), "store returned status 503: upstream");
    }
}
