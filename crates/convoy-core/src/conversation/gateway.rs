//! The access gateway: the single in-process entry point for conversation
//! reads.
//!
//! The gateway owns how a read is attempted and reported, never the data.
//! It validates the project id before touching the store, connects lazily on
//! first use and keeps the handle for every later call, bounds each read with
//! a deadline, and folds every store failure into one [`DataAccessError`]
//! shape. "No data" is an empty list, not an error.

use std::error::Error as _;
use std::time::Duration;

use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use convoy_types::conversation::{ConversationSummary, ProjectId};
use convoy_types::error::{DataAccessError, DataAccessKind, GatewayError, StoreError};

use super::store::{ConversationStore, StoreConnector};

/// Per-call overrides for a conversation read.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Deadline for this read; the gateway default applies when `None`.
    pub timeout: Option<Duration>,
    /// Aborts the read when cancelled.
    pub cancel: Option<CancellationToken>,
}

impl ReadOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Process-wide reader of project conversations.
///
/// Generic over [`StoreConnector`] so convoy-core never depends on the
/// concrete store client. Obtain the shared instance through
/// [`GatewaySlot`](super::slot::GatewaySlot).
pub struct AccessGateway<C: StoreConnector> {
    connector: C,
    store: OnceCell<C::Store>,
    read_timeout: Duration,
}

impl<C: StoreConnector> AccessGateway<C> {
    /// Create a gateway. No connection is made until the first read.
    pub fn new(connector: C, read_timeout: Duration) -> Self {
        Self {
            connector,
            store: OnceCell::new(),
            read_timeout,
        }
    }

    /// Default deadline applied to reads.
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Whether the store handle has been acquired.
    pub fn is_connected(&self) -> bool {
        self.store.initialized()
    }

    /// Read the conversations of a project with the default deadline.
    pub async fn get_project_conversations(
        &self,
        project_id: &str,
    ) -> Result<Vec<ConversationSummary>, GatewayError> {
        self.get_project_conversations_with(project_id, ReadOptions::default())
            .await
    }

    /// Read the conversations of a project.
    ///
    /// - An invalid id fails with [`GatewayError::Validation`] before the
    ///   store is contacted.
    /// - A project without conversations yields an empty vec.
    /// - Deadline expiry or cancellation fails with a
    ///   [`DataAccessKind::Timeout`] error; the in-flight read is dropped.
    pub async fn get_project_conversations_with(
        &self,
        project_id: &str,
        options: ReadOptions,
    ) -> Result<Vec<ConversationSummary>, GatewayError> {
        let project_id = match ProjectId::parse(project_id) {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "Rejected conversation read");
                return Err(err.into());
            }
        };

        let deadline = options.timeout.unwrap_or(self.read_timeout);
        let cancel = options.cancel.unwrap_or_else(CancellationToken::new);

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                Err(DataAccessError::timeout("conversation read cancelled by caller"))
            }
            result = tokio::time::timeout(deadline, self.read(&project_id)) => {
                result.unwrap_or_else(|_| {
                    Err(DataAccessError::timeout(format!(
                        "conversation read exceeded {}ms",
                        deadline.as_millis()
                    )))
                })
            }
        };

        match outcome {
            Ok(conversations) => {
                info!(
                    project_id = %project_id,
                    count = conversations.len(),
                    "Loaded project conversations"
                );
                Ok(conversations)
            }
            Err(err) => {
                let cause = err.source().map(|source| source.to_string());
                error!(
                    project_id = %project_id,
                    kind = err.kind().as_str(),
                    cause = cause.as_deref().unwrap_or("none"),
                    "Conversation read failed: {err}"
                );
                Err(err.into())
            }
        }
    }

    async fn read(&self, project_id: &ProjectId) -> Result<Vec<ConversationSummary>, DataAccessError> {
        let store = self
            .store
            .get_or_try_init(|| async {
                debug!("Connecting to conversation store");
                self.connector.connect().await
            })
            .await
            .map_err(|err| normalize(err, "could not connect to conversation store"))?;

        let conversations = match store.list_conversations(project_id).await {
            Ok(conversations) => conversations,
            Err(StoreError::NotFound) => {
                debug!(project_id = %project_id, "Store reported no data");
                return Ok(Vec::new());
            }
            Err(err) => return Err(normalize(err, "conversation read failed")),
        };

        if let Some(stray) = conversations.iter().find(|c| !c.belongs_to(project_id)) {
            return Err(DataAccessError::new(
                DataAccessKind::Malformed,
                format!(
                    "store returned conversation {} scoped to project '{}'",
                    stray.id().map_or_else(|| "without id".to_string(), ToString::to_string),
                    stray.project_id().unwrap_or_default()
                ),
            ));
        }

        Ok(conversations)
    }
}

/// Fold a store-layer error into the gateway's single failure shape.
fn normalize(err: StoreError, context: &str) -> DataAccessError {
    let kind = match &err {
        StoreError::Timeout => DataAccessKind::Timeout,
        StoreError::Decode(_) => DataAccessKind::Malformed,
        StoreError::Connection(_) | StoreError::Status { .. } | StoreError::NotFound => {
            DataAccessKind::Unavailable
        }
    };
    DataAccessError::new(kind, format!("{context}: {}", kind.describe())).with_source(err)
}
