//! PostgREST-backed conversation store.
//!
//! Implements `StoreConnector` and `ConversationStore` from `convoy-core`.
//! Reads `GET {store_url}/rest/v1/conversations` filtered by `project_id`,
//! newest first.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use convoy_core::conversation::{ConversationStore, StoreConnector};
use convoy_types::conversation::{ConversationSummary, ProjectId};
use convoy_types::error::StoreError;

use super::{build_client, truncate_body, with_credential};
use crate::config::EnvConfig;

/// Builds the HTTP client for the store on first use.
pub struct RestConnector {
    base_url: String,
    api_key: SecretString,
    request_timeout: Duration,
}

impl RestConnector {
    /// Connector for the store named in the environment configuration.
    ///
    /// `request_timeout` bounds every HTTP exchange; the gateway applies its
    /// own, usually tighter, deadline on top.
    pub fn new(config: &EnvConfig, request_timeout: Duration) -> Self {
        Self::from_parts(config.store_url.clone(), config.store_key(), request_timeout)
    }

    pub fn from_parts(
        base_url: impl Into<String>,
        api_key: SecretString,
        request_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            request_timeout,
        }
    }
}

impl StoreConnector for RestConnector {
    type Store = RestConversationStore;

    async fn connect(&self) -> Result<RestConversationStore, StoreError> {
        let client = build_client(self.request_timeout)
            .map_err(|e| StoreError::Connection(format!("failed to build HTTP client: {e}")))?;

        debug!(base_url = %self.base_url, "Conversation store client ready");

        Ok(RestConversationStore {
            client,
            endpoint: format!("{}/rest/v1/conversations", self.base_url),
            api_key: SecretString::from(self.api_key.expose_secret().to_owned()),
        })
    }
}

/// Connected store handle. Cheap to share; the inner client pools
/// connections.
pub struct RestConversationStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
}

impl ConversationStore for RestConversationStore {
    async fn list_conversations(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ConversationSummary>, StoreError> {
        let filter = format!("eq.{project_id}");
        let response = with_credential(self.client.get(&self.endpoint), &self.api_key)
            .query(&[
                ("select", "*"),
                ("project_id", filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NOT_ACCEPTABLE {
            return Err(StoreError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout
    } else {
        StoreError::Connection(err.to_string())
    }
}
