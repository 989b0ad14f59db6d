//! Exception classifier
//!
//! Maps opaque transport failures into the typed taxonomy. Pure, except for
//! the connectivity probe consulted on generic I/O failures.

use crate::code::ErrorCode;
use crate::error::{Failure, NetworkError};
use crate::wrapper::ErrorWrapper;
use std::sync::Arc;
use wirecall_transport::{ConnectivityProbe, TransportError};

/// Classifies raised failures into exactly one [`NetworkError`].
#[derive(Clone)]
pub struct ExceptionClassifier {
    probe: Arc<dyn ConnectivityProbe>,
}

impl ExceptionClassifier {
    /// Create a classifier backed by `probe`
    pub fn new(probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self { probe }
    }

    /// Classify a raised failure.
    ///
    /// Idempotent: an already-typed [`NetworkError`] passes through
    /// unchanged.
    pub async fn classify(&self, failure: Failure) -> NetworkError {
        match failure {
            Failure::Network(error) => error,
            Failure::Transport(err) => self.classify_transport(err).await,
        }
    }

    async fn classify_transport(&self, err: TransportError) -> NetworkError {
        let data = ErrorWrapper::empty(
            Some(err.message()),
            ErrorCode::general_http_exception(),
            None,
        );

        match err {
            TransportError::Timeout(_) => NetworkError::ServerTimeout { data },
            TransportError::Cancelled(_) => NetworkError::JobCancellation { data },
            TransportError::Io(_) | TransportError::Connection(_) => {
                self.classify_io_failure(data).await
            }
            other => NetworkError::Unknown {
                data,
                initial_error_code: ErrorCode::unknown().raw().to_string(),
                initial_exception_name: other.kind_name().to_string(),
            },
        }
    }

    /// An I/O failure is a dead network only when the probe cannot reach a
    /// known host; otherwise the failure is presumed server-side.
    async fn classify_io_failure(&self, data: ErrorWrapper) -> NetworkError {
        if !self.probe.is_connection_available().await {
            NetworkError::NoConnection { data }
        } else {
            NetworkError::InternalServer { data }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::CodeKind;
    use assert_matches::assert_matches;
    use async_trait::async_trait;

    struct FixedProbe(bool);

    #[async_trait]
    impl ConnectivityProbe for FixedProbe {
        async fn is_connection_available(&self) -> bool {
            self.0
        }
    }

    fn classifier(online: bool) -> ExceptionClassifier {
        ExceptionClassifier::new(Arc::new(FixedProbe(online)))
    }

    #[tokio::test]
    async fn test_timeout_maps_to_server_timeout_with_detail() {
        let error = classifier(true)
            .classify(TransportError::Timeout("read timed out".into()).into())
            .await;

        assert_matches!(&error, NetworkError::ServerTimeout { data } => {
            assert_eq!(data.error_message(), "read timed out");
            assert_eq!(data.error_code.kind(), CodeKind::GeneralHttpException);
        });
    }

    #[tokio::test]
    async fn test_cancellation_is_propagated_not_swallowed() {
        let error = classifier(true)
            .classify(TransportError::Cancelled("scope dropped".into()).into())
            .await;

        assert_matches!(error, NetworkError::JobCancellation { .. });
    }

    #[tokio::test]
    async fn test_io_failure_offline_maps_to_no_connection() {
        let error = classifier(false)
            .classify(TransportError::Io(std::io::Error::other("reset")).into())
            .await;

        assert_matches!(error, NetworkError::NoConnection { .. });
    }

    #[tokio::test]
    async fn test_io_failure_online_maps_to_internal_server() {
        let error = classifier(true)
            .classify(TransportError::Io(std::io::Error::other("reset")).into())
            .await;

        assert_matches!(error, NetworkError::InternalServer { .. });
    }

    #[tokio::test]
    async fn test_connection_failure_consults_probe_too() {
        let error = classifier(false)
            .classify(TransportError::Connection("refused".into()).into())
            .await;

        assert_matches!(error, NetworkError::NoConnection { .. });
    }

    #[tokio::test]
    async fn test_unmatched_failure_preserves_kind_name() {
        let error = classifier(true)
            .classify(TransportError::Http("418".into()).into())
            .await;

        assert_matches!(error, NetworkError::Unknown { initial_exception_name, .. } => {
            assert_eq!(initial_exception_name, "HttpError");
        });
    }

    #[tokio::test]
    async fn test_classification_is_idempotent() {
        let original = NetworkError::UpdateRequired {
            data: ErrorWrapper::empty(
                Some("update".into()),
                ErrorCode::resolve("UPDATE_REQUIRED"),
                None,
            ),
        };

        let classified = classifier(true).classify(original.into()).await;
        assert_matches!(classified, NetworkError::UpdateRequired { data } => {
            assert_eq!(data.error_message(), "update");
        });
    }
}
