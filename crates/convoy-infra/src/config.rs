//! Configuration loading for Convoy.
//!
//! Two sources:
//! - [`EnvConfig`]: the backend endpoints and credential, read from the
//!   environment. Every variable is required; a missing one is fatal at
//!   startup.
//! - [`load_server_config`]: the optional `convoy.toml` with rewrite rules
//!   and read deadlines. Falls back to defaults when the file is missing or
//!   malformed.

use std::path::Path;

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};

use convoy_types::config::ServerConfig;
use convoy_types::error::ConfigError;

pub const STORE_URL_VAR: &str = "CONVOY_STORE_URL";
pub const STORE_KEY_VAR: &str = "CONVOY_STORE_KEY";
pub const SITE_URL_VAR: &str = "CONVOY_SITE_URL";
pub const API_URL_VAR: &str = "CONVOY_API_URL";

/// Backend endpoints and credential.
///
/// URLs are stored without a trailing slash. The store credential is a
/// [`SecretString`] and never appears in `Debug` output.
#[derive(Debug)]
pub struct EnvConfig {
    /// Base URL of the managed store (REST and auth live under it).
    pub store_url: String,
    /// Service credential sent to the store and identity provider.
    pub store_key: SecretString,
    /// Public URL of the site; used for signup confirmation redirects.
    pub site_url: String,
    /// Public URL of this API.
    pub api_url: String,
}

impl EnvConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let store_url = parse_base_url(STORE_URL_VAR, &required(STORE_URL_VAR)?)?;
        let store_key = SecretString::from(required(STORE_KEY_VAR)?);
        let site_url = parse_base_url(SITE_URL_VAR, &required(SITE_URL_VAR)?)?;
        let api_url = parse_base_url(API_URL_VAR, &required(API_URL_VAR)?)?;

        Ok(Self {
            store_url,
            store_key,
            site_url,
            api_url,
        })
    }

    /// A fresh copy of the store credential.
    pub fn store_key(&self) -> SecretString {
        SecretString::from(self.store_key.expose_secret().to_owned())
    }
}

/// Validate an http(s) base URL and strip any trailing slash.
fn parse_base_url(key: &str, value: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: key.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("base URL must not carry a query or fragment".to_string()));
    }

    Ok(value.trim_end_matches('/').to_string())
}

/// Load server configuration from `path`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_server_config(path: &Path) -> ServerConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServerConfig::default()
        }
    }
}
