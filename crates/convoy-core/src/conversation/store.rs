//! Store port traits.
//!
//! The store is split into a connector and a connected handle so the gateway
//! can defer connection setup until the first read and then reuse the handle
//! for the lifetime of the process. Uses native async fn in traits (RPITIT,
//! Rust 2024 edition).

use convoy_types::conversation::{ConversationSummary, ProjectId};
use convoy_types::error::StoreError;

/// A connected, project-scoped conversation reader.
///
/// Implementations live in convoy-infra (e.g., `RestConversationStore`).
pub trait ConversationStore: Send + Sync {
    /// List the conversations of a project, newest first.
    ///
    /// Implementations may return [`StoreError::NotFound`] when the backend
    /// reports the project or table as absent; the gateway treats that as an
    /// empty list.
    fn list_conversations(
        &self,
        project_id: &ProjectId,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationSummary>, StoreError>> + Send;
}

/// Produces a [`ConversationStore`] on demand.
pub trait StoreConnector: Send + Sync {
    type Store: ConversationStore;

    /// Establish the connection handle. Called at most once per successful
    /// connection by the gateway.
    fn connect(&self) -> impl std::future::Future<Output = Result<Self::Store, StoreError>> + Send;
}
