//! Server configuration types for Convoy.
//!
//! `ServerConfig` represents the optional `convoy.toml` that controls the
//! edge rewrite table and gateway read deadlines. Every field has a default,
//! so an empty or missing file yields a working server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Path served by the default conversation handler.
pub const DEFAULT_CONVERSATIONS_PATH: &str = "/api/projects/conversations";

/// Path served by the edge conversation handler.
pub const EDGE_CONVERSATIONS_PATH: &str = "/api/edge/projects/conversations";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Edge rewrite rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Rules consulted in order; the first matching prefix wins.
    #[serde(default = "default_rules")]
    pub rules: Vec<RewriteRuleConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

fn default_rules() -> Vec<RewriteRuleConfig> {
    vec![RewriteRuleConfig {
        prefix: DEFAULT_CONVERSATIONS_PATH.to_string(),
        target: EDGE_CONVERSATIONS_PATH.to_string(),
    }]
}

/// One monitored prefix and the path its requests are rewritten to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRuleConfig {
    pub prefix: String,
    pub target: String,
}

/// Deadlines applied to conversation reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Deadline for a read when the caller does not supply one.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Upper bound for caller-supplied deadlines.
    #[serde(default = "default_max_read_timeout_ms")]
    pub max_read_timeout_ms: u64,
}

fn default_read_timeout_ms() -> u64 {
    10_000
}

fn default_max_read_timeout_ms() -> u64 {
    30_000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: default_read_timeout_ms(),
            max_read_timeout_ms: default_max_read_timeout_ms(),
        }
    }
}

impl GatewayConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Reject deadlines that would fail every read or that the store
    /// client would cut short.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_timeout_ms == 0 {
            return Err(invalid("gateway.read_timeout_ms", "must be greater than zero"));
        }
        if self.read_timeout_ms > self.max_read_timeout_ms {
            return Err(invalid(
                "gateway.read_timeout_ms",
                format!(
                    "{} exceeds gateway.max_read_timeout_ms ({})",
                    self.read_timeout_ms, self.max_read_timeout_ms
                ),
            ));
        }
        Ok(())
    }

    /// Clamp a caller-requested deadline to `max_read_timeout_ms`.
    pub fn clamp_timeout(&self, requested_ms: u64) -> Duration {
        Duration::from_millis(requested_ms.min(self.max_read_timeout_ms))
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}
