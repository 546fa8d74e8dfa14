//! In-memory store fakes shared by the gateway and slot tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Utc;
use convoy_types::conversation::{ConversationSummary, ProjectId};
use convoy_types::error::StoreError;

use super::store::{ConversationStore, StoreConnector};

type Responder =
    Arc<dyn Fn(&ProjectId) -> Result<Vec<ConversationSummary>, StoreError> + Send + Sync>;

/// Connector whose store answers through a closure and counts every call.
#[derive(Clone)]
pub(crate) struct FakeConnector {
    pub connects: Arc<AtomicUsize>,
    pub reads: Arc<AtomicUsize>,
    failing_connects: usize,
    connect_delay: Duration,
    read_delay: Duration,
    responder: Responder,
}

impl FakeConnector {
    pub fn new(
        responder: impl Fn(&ProjectId) -> Result<Vec<ConversationSummary>, StoreError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            connects: Arc::new(AtomicUsize::new(0)),
            reads: Arc::new(AtomicUsize::new(0)),
            failing_connects: 0,
            connect_delay: Duration::ZERO,
            read_delay: Duration::ZERO,
            responder: Arc::new(responder),
        }
    }

    /// A store holding `count` conversations for every project.
    pub fn with_count(count: usize) -> Self {
        Self::new(move |project_id| Ok(summaries(project_id.as_str(), count)))
    }

    /// Fail the first `n` connection attempts.
    pub fn failing_connects(mut self, n: usize) -> Self {
        self.failing_connects = n;
        self
    }

    pub fn connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = delay;
        self
    }

    pub fn read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = delay;
        self
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

pub(crate) struct FakeStore {
    reads: Arc<AtomicUsize>,
    read_delay: Duration,
    responder: Responder,
}

impl ConversationStore for FakeStore {
    async fn list_conversations(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ConversationSummary>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if !self.read_delay.is_zero() {
            tokio::time::sleep(self.read_delay).await;
        }
        (self.responder)(project_id)
    }
}

impl StoreConnector for FakeConnector {
    type Store = FakeStore;

    async fn connect(&self) -> Result<FakeStore, StoreError> {
        let attempt = self.connects.fetch_add(1, Ordering::SeqCst);
        if !self.connect_delay.is_zero() {
            tokio::time::sleep(self.connect_delay).await;
        }
        if attempt < self.failing_connects {
            return Err(StoreError::Connection("connection refused".to_string()));
        }
        Ok(FakeStore {
            reads: Arc::clone(&self.reads),
            read_delay: self.read_delay,
            responder: Arc::clone(&self.responder),
        })
    }
}

pub(crate) fn summaries(project_id: &str, count: usize) -> Vec<ConversationSummary> {
    (0..count)
        .map(|i| {
            let row = serde_json::json!({
                "id": format!("conv-{i}"),
                "project_id": project_id,
                "title": format!("Session {i}"),
                "created_at": Utc::now().to_rfc3339(),
                "updated_at": null,
            });
            serde_json::from_value(row).unwrap()
        })
        .collect()
}
