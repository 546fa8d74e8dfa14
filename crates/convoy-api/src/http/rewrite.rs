//! Edge rewrite: internal forwarding of monitored paths to the edge handler.
//!
//! A request whose path lies under a monitored prefix and which carries a
//! non-empty `projectId` is dispatched to the rule's target path instead.
//! Only `projectId` survives the rewrite; every other query parameter is
//! dropped. Anything else passes through untouched.
//!
//! The middleware must wrap the router as a service (see
//! [`build_router`](super::router::build_router)); `Router::layer` runs after
//! route matching and would see the original path.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Uri;
use axum::http::uri::PathAndQuery;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};
use url::form_urlencoded;

use convoy_types::config::RoutingConfig;
use convoy_types::error::ConfigError;

/// Query parameter that selects the project.
pub const PROJECT_ID_PARAM: &str = "projectId";

const ROUTE_SYNTAX: [char; 4] = [':', '*', '{', '}'];

/// One monitored prefix and the path its requests are forwarded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    prefix: String,
    target: String,
}

impl RewriteRule {
    pub fn new(prefix: &str, target: &str) -> Self {
        Self {
            prefix: normalize_path(prefix),
            target: normalize_path(target),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether `path` equals the prefix or lies under it on a segment
    /// boundary (`/a/b` matches `/a/b/c` but not `/a/bc`).
    pub fn matches(&self, path: &str) -> bool {
        if self.prefix == "/" {
            return path.starts_with('/');
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

fn normalize_path(path: &str) -> String {
    match path.trim_end_matches('/') {
        "" => "/".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// What the router should do with a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RewriteDecision {
    /// Dispatch to this path and query instead.
    Forward(PathAndQuery),
    PassThrough,
}

/// The URI a request carried before it was rewritten. Present only on
/// rewritten requests.
#[derive(Debug, Clone)]
pub struct RewrittenFrom(pub Uri);

/// Ordered rewrite rules; the first matching prefix wins.
#[derive(Debug, Clone, Default)]
pub struct RewriteTable {
    rules: Vec<RewriteRule>,
}

impl RewriteTable {
    /// Build a table, rejecting rules that could loop or that do not form
    /// valid paths.
    pub fn new(rules: Vec<RewriteRule>) -> Result<Self, ConfigError> {
        for rule in &rules {
            for path in [rule.prefix(), rule.target()] {
                if !path.starts_with('/') || path.contains(['?', '#']) {
                    return Err(ConfigError::InvalidRoute(format!(
                        "'{path}' must be an absolute path without query or fragment"
                    )));
                }
                if path.parse::<PathAndQuery>().is_err() {
                    return Err(ConfigError::InvalidRoute(format!(
                        "'{path}' is not a valid request path"
                    )));
                }
            }
            // Targets are registered as router paths, where these mark captures.
            if rule.target().contains(ROUTE_SYNTAX) {
                return Err(ConfigError::InvalidRoute(format!(
                    "target '{}' must be a literal path without ':', '*', '{{' or '}}'",
                    rule.target()
                )));
            }
        }

        // A target under any monitored prefix would be rewritten again.
        for rule in &rules {
            if let Some(other) = rules.iter().find(|other| other.matches(rule.target())) {
                return Err(ConfigError::InvalidRoute(format!(
                    "target '{}' falls under monitored prefix '{}'",
                    rule.target(),
                    other.prefix()
                )));
            }
        }

        Ok(Self { rules })
    }

    pub fn from_config(config: &RoutingConfig) -> Result<Self, ConfigError> {
        Self::new(
            config
                .rules
                .iter()
                .map(|rule| RewriteRule::new(&rule.prefix, &rule.target))
                .collect(),
        )
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Distinct target paths, in rule order.
    pub fn targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            if !targets.contains(&rule.target()) {
                targets.push(rule.target());
            }
        }
        targets
    }

    /// Fail if a rewrite target is also a built-in route.
    pub fn check_reserved(&self, reserved: &[&str]) -> Result<(), ConfigError> {
        match self
            .rules
            .iter()
            .find(|rule| reserved.contains(&rule.target()))
        {
            Some(rule) => Err(ConfigError::InvalidRoute(format!(
                "target '{}' collides with a built-in route",
                rule.target()
            ))),
            None => Ok(()),
        }
    }

    /// Decide where a request with this path and query goes.
    pub fn resolve(&self, path: &str, query: Option<&str>) -> RewriteDecision {
        let Some(rule) = self.rules.iter().find(|rule| rule.matches(path)) else {
            return RewriteDecision::PassThrough;
        };

        let project_id = query.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == PROJECT_ID_PARAM)
                .map(|(_, value)| value.into_owned())
        });
        let Some(project_id) = project_id.filter(|value| !value.is_empty()) else {
            return RewriteDecision::PassThrough;
        };

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(PROJECT_ID_PARAM, &project_id)
            .finish();
        match PathAndQuery::try_from(format!("{}?{query}", rule.target())) {
            Ok(target) => RewriteDecision::Forward(target),
            Err(err) => {
                warn!(path, error = %err, "Could not build rewrite target, passing through");
                RewriteDecision::PassThrough
            }
        }
    }
}

/// Middleware that applies the [`RewriteTable`] before routing.
pub async fn rewrite_request(
    State(table): State<Arc<RewriteTable>>,
    mut request: Request,
    next: Next,
) -> Response {
    let decision = table.resolve(request.uri().path(), request.uri().query());

    if let RewriteDecision::Forward(target) = decision {
        let original = request.uri().clone();
        let mut parts = original.clone().into_parts();
        parts.path_and_query = Some(target);

        match Uri::from_parts(parts) {
            Ok(uri) => {
                debug!(from = %original, to = %uri, "Rewrote request to edge handler");
                *request.uri_mut() = uri;
                request.extensions_mut().insert(RewrittenFrom(original));
            }
            Err(err) => {
                warn!(uri = %original, error = %err, "Rewrite produced an invalid URI, passing through");
            }
        }
    }

    next.run(request).await
}
