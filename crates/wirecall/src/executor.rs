//! Operation executor
//!
//! Owns the lifecycle state machine around a single asynchronous operation:
//! `Idle → Running → {Succeeded, Failed} → (Retrying → Running)* →
//! Finalized`. Exactly one of the success/error paths executes per attempt;
//! the finish and loading-off hooks fire on every attempt except one
//! superseded by a renewal retry.

use crate::classifier::ExceptionClassifier;
use crate::error::{Failure, NetworkError, OperationError};
use crate::operation::Operation;
use crate::state::ErrorStateHandler;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wirecall_transport::TransportError;

/// Executes network operations described by [`Operation`] descriptors.
///
/// Collaborators are injected at construction; the executor itself is
/// stateless and shared freely across concurrent operations.
pub struct NetworkExecutor {
    exception_classifier: ExceptionClassifier,
    error_state: Arc<dyn ErrorStateHandler>,
}

impl NetworkExecutor {
    /// Create an executor with its collaborators
    pub fn new(
        exception_classifier: ExceptionClassifier,
        error_state: Arc<dyn ErrorStateHandler>,
    ) -> Self {
        Self {
            exception_classifier,
            error_state,
        }
    }

    /// Launch an operation onto the runtime, bound to `scope`.
    ///
    /// Cancelling `scope` aborts the in-flight call and surfaces as a
    /// job-cancellation error. Defects of the operation machinery are logged
    /// rather than panicking the task.
    pub fn launch<T, E>(
        self: &Arc<Self>,
        scope: CancellationToken,
        operation: Operation<T, E>,
    ) -> tokio::task::JoinHandle<()>
    where
        T: Send + 'static,
        E: DeserializeOwned + Send + 'static,
    {
        let executor = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(defect) = executor.run(scope, &operation).await {
                tracing::error!(error = %defect, "network operation surfaced a defect");
            }
        })
    }

    /// Run an operation to completion on the current task.
    pub async fn run<T, E>(
        &self,
        scope: CancellationToken,
        operation: &Operation<T, E>,
    ) -> Result<(), OperationError>
    where
        T: Send,
        E: DeserializeOwned + Send,
    {
        self.run_attempt(scope, operation, false).await
    }

    /// One attempt of the operation. `renewal_attempt` marks the re-invocation
    /// that follows a successful session renewal; it is never set twice.
    fn run_attempt<'a, T, E>(
        &'a self,
        scope: CancellationToken,
        operation: &'a Operation<T, E>,
        renewal_attempt: bool,
    ) -> BoxFuture<'a, Result<(), OperationError>>
    where
        T: Send,
        E: DeserializeOwned + Send,
    {
        Box::pin(async move {
            let execute = operation
                .execute
                .as_ref()
                .ok_or(OperationError::MissingExecution)?;

            if let Some(loading) = &operation.loading {
                loading(true);
            }
            if let Some(toggle) = &operation.module_toggle {
                toggle(true);
            }
            if let Some(start) = &operation.on_start {
                start().await;
            }

            let outcome = tokio::select! {
                _ = scope.cancelled() => Err(Failure::Transport(TransportError::Cancelled(
                    "operation scope cancelled".to_string(),
                ))),
                outcome = execute() => outcome,
            };

            let mut superseded = false;
            let mut defect = None;

            match outcome {
                Ok(result) => {
                    if let Some(toggle) = &operation.module_toggle {
                        toggle(false);
                    }
                    if let Some(on_success) = &operation.on_success {
                        on_success(&result);
                    }
                    if let Some(on_success_async) = &operation.on_success_async {
                        on_success_async(result).await;
                    }
                }
                Err(failure) => {
                    let error = self.exception_classifier.classify(failure).await;
                    if let Some(toggle) = &operation.module_toggle {
                        toggle(false);
                    }
                    match self
                        .handle_failure(scope.clone(), operation, error, renewal_attempt)
                        .await
                    {
                        Ok(retrying) => superseded = retrying,
                        Err(error) => defect = Some(error),
                    }
                }
            }

            // Terminal hooks are skipped only when a renewal retry has taken
            // over; the retried attempt runs them on its own way out.
            if !superseded {
                if let Some(finish) = &operation.on_finish {
                    finish().await;
                }
                if let Some(loading) = &operation.loading {
                    loading(false);
                }
            }

            defect.map_or(Ok(()), Err)
        })
    }

    /// Resolve a failed attempt: either hand it to the renewal protocol
    /// (returning `true`, the attempt is superseded) or finalize it through
    /// the state dispatch and the typed-error hook.
    async fn handle_failure<'a, T, E>(
        &'a self,
        scope: CancellationToken,
        operation: &'a Operation<T, E>,
        error: NetworkError,
        renewal_attempt: bool,
    ) -> Result<bool, OperationError>
    where
        T: Send,
        E: DeserializeOwned + Send,
    {
        if !renewal_attempt && error.is_unauthorized() {
            tracing::debug!(code = %error.error_code(), "session expired, requesting renewal");

            let retry_scope = scope.clone();
            let on_renewed = Box::pin(async move {
                if let Err(defect) = self.run_attempt(retry_scope, operation, true).await {
                    tracing::error!(error = %defect, "renewed operation surfaced a defect");
                }
            });
            self.error_state
                .handle_refresh_token_state(scope, on_renewed)
                .await;
            return Ok(true);
        }

        match &error {
            NetworkError::NoConnection { .. } => {
                // The descriptor's connection hook, when present, consumes
                // the failure instead of the global handler.
                if let Some(on_connection_error) = &operation.on_connection_error {
                    on_connection_error().await;
                    return Ok(false);
                }
                self.error_state.handle_no_connection_error_state();
            }
            NetworkError::ServerTimeout { .. } => {
                self.error_state.handle_server_timeout_error_state();
            }
            NetworkError::UpdateRequired { .. } => {
                self.error_state
                    .handle_app_must_update_state(error.error_message());
            }
            _ => self.error_state.handle_error_entity_state(&error).await,
        }

        let error_data = error.wrapper().error_data::<E>()?;
        if let Some(on_error) = &operation.on_error {
            on_error(error, error_data).await;
        }

        Ok(false)
    }
}
