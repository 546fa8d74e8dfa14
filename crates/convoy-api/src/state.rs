//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and HTTP
//! handlers. The core services are generic over their port traits; AppState
//! pins them to the REST implementations from convoy-infra.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use convoy_core::conversation::{AccessGateway, GatewaySlot};
use convoy_core::identity::SignupService;
use convoy_infra::config::{EnvConfig, load_server_config};
use convoy_infra::rest::{RestConnector, RestIdentityProvider};
use convoy_types::config::{GatewayConfig, ServerConfig};

use crate::http::rewrite::RewriteTable;
use crate::http::router::RESERVED_PATHS;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteGateway = AccessGateway<RestConnector>;

pub type ConcreteSignupService = SignupService<RestIdentityProvider>;

/// The process-wide gateway. Reached only from [`AppState::init`]; handlers
/// get it through the state.
static GATEWAY: GatewaySlot<RestConnector> = GatewaySlot::new();

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ConcreteGateway>,
    pub signup_service: Arc<ConcreteSignupService>,
    pub rewrites: Arc<RewriteTable>,
    pub gateway_config: GatewayConfig,
}

impl AppState {
    /// Initialize the application state from the environment and the config
    /// file at `config_path`.
    pub async fn init(config_path: &Path) -> anyhow::Result<Self> {
        let env = EnvConfig::from_env()?;
        let config = load_server_config(config_path).await;
        config.gateway.validate()?;

        let gateway = GATEWAY.get_or_init(|| build_gateway(&env, &config.gateway));

        Self::new(&env, config, gateway)
    }

    /// Wire the state around an existing gateway.
    pub fn new(
        env: &EnvConfig,
        config: ServerConfig,
        gateway: Arc<ConcreteGateway>,
    ) -> anyhow::Result<Self> {
        config.gateway.validate()?;
        let rewrites = RewriteTable::from_config(&config.routing)?;
        rewrites.check_reserved(RESERVED_PATHS)?;

        let signup_service = SignupService::new(RestIdentityProvider::new(env)?);

        Ok(Self {
            gateway,
            signup_service: Arc::new(signup_service),
            rewrites: Arc::new(rewrites),
            gateway_config: config.gateway,
        })
    }
}

/// A gateway for the configured store. The HTTP client timeout is the
/// longest deadline a caller may request, so the gateway deadline governs
/// every read.
pub fn build_gateway(env: &EnvConfig, config: &GatewayConfig) -> ConcreteGateway {
    let connector = RestConnector::new(env, Duration::from_millis(config.max_read_timeout_ms));
    AccessGateway::new(connector, config.read_timeout())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use convoy_infra::config::{API_URL_VAR, SITE_URL_VAR, STORE_KEY_VAR, STORE_URL_VAR};
    use convoy_types::config::{RewriteRuleConfig, RoutingConfig};
    use convoy_types::error::ConfigError;

    use super::*;

    fn env() -> EnvConfig {
        let vars: HashMap<&str, String> = HashMap::from([
            (STORE_URL_VAR, "http://127.0.0.1:9".to_string()),
            (STORE_KEY_VAR, "test-key".to_string()),
            (SITE_URL_VAR, "https://app.example.com".to_string()),
            (API_URL_VAR, "https://api.example.com".to_string()),
        ]);
        EnvConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    fn state_with(config: ServerConfig) -> anyhow::Result<AppState> {
        let env = env();
        let gateway = Arc::new(build_gateway(&env, &config.gateway));
        AppState::new(&env, config, gateway)
    }

    fn config_error(result: anyhow::Result<AppState>) -> ConfigError {
        match result {
            Ok(_) => panic!("expected a configuration error"),
            Err(err) => err.downcast::<ConfigError>().unwrap(),
        }
    }

    #[test]
    fn test_default_config_builds_state() {
        let state = state_with(ServerConfig::default()).unwrap();
        assert_eq!(state.rewrites.rules().len(), 1);
    }

    #[test]
    fn test_zero_read_timeout_is_refused() {
        let mut config = ServerConfig::default();
        config.gateway.read_timeout_ms = 0;

        let err = config_error(state_with(config));
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_read_timeout_above_client_timeout_is_refused() {
        let mut config = ServerConfig::default();
        config.gateway.read_timeout_ms = 60_000;
        config.gateway.max_read_timeout_ms = 30_000;

        let err = config_error(state_with(config));
        assert!(err.to_string().contains("read_timeout_ms"));
    }

    #[test]
    fn test_capture_syntax_in_target_is_refused() {
        let config = ServerConfig {
            routing: RoutingConfig {
                rules: vec![RewriteRuleConfig {
                    prefix: "/api/projects/conversations".to_string(),
                    target: "/api/edge/:project".to_string(),
                }],
            },
            ..ServerConfig::default()
        };

        let err = config_error(state_with(config));
        assert!(matches!(err, ConfigError::InvalidRoute(_)));
    }
}
