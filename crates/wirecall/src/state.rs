//! Error-state collaborator
//!
//! The executor reports global error states (session renewal, connectivity,
//! forced updates, document-lifecycle notifications) to this collaborator.
//! Applications implement it once; projects can extend it with their own
//! states on top of the core set.

use crate::code::ErrorCode;
use crate::error::NetworkError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

/// Handles global error states raised by network operations.
#[async_trait]
pub trait ErrorStateHandler: Send + Sync {
    /// Handle a finalized error by its type (navigation, dialogs, logout).
    async fn handle_error_entity_state(&self, error: &NetworkError);

    /// The session must be renewed.
    ///
    /// On successful renewal the collaborator drives `on_renewed`, which
    /// re-runs the failed operation exactly once. If renewal fails the
    /// collaborator owns the fallout (typically a forced logout) and the
    /// operation is abandoned.
    async fn handle_refresh_token_state(
        &self,
        scope: CancellationToken,
        on_renewed: BoxFuture<'_, ()>,
    );

    /// Network connection problem.
    fn handle_no_connection_error_state(&self) {}

    /// Network request timed out.
    fn handle_server_timeout_error_state(&self) {}

    /// The client must update before talking to the server again.
    fn handle_app_must_update_state(&self, _message: &str) {}

    /// Global notification for a document-lifecycle code; the resulting
    /// dialog renders while the originating call is still held open.
    async fn handle_global_action(&self, code: &ErrorCode, message: &str);
}
