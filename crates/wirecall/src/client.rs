//! API client façade
//!
//! Ties the shared transport and the two classifiers together: executes a
//! described call and returns either the decoded payload or exactly one
//! typed error. Data sources may plug in a local [`ExceptionOverride`] to
//! claim transport failures before the global classifier runs.

use crate::classifier::{ExceptionClassifier, ResultClassifier};
use crate::error::{Failure, NetworkError};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::LazyLock;
use thiserror::Error;
use wirecall_transport::{ApiRequest, Transport, TransportError};

/// Paths handed to [`ApiClient::endpoint`] must not pin a version; versions
/// belong on individual calls.
static VERSION_SEGMENT: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"/v\d+/").expect("static pattern is valid"));

/// A configured path carried version information.
#[derive(Debug, Error)]
#[error("path should not contain version information, declare versions on individual calls: {0}")]
pub struct VersionedPathError(String);

/// Locally handles transport failures for one data source.
///
/// Returning `None` delegates the failure to the global exception
/// classifier.
pub trait ExceptionOverride: Send + Sync {
    /// Claim `failure`, or pass it on
    fn handle(&self, failure: &TransportError) -> Option<NetworkError>;
}

/// Executes API calls and classifies their outcomes.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    result_classifier: ResultClassifier,
    exception_classifier: ExceptionClassifier,
    exception_override: Option<Arc<dyn ExceptionOverride>>,
}

impl ApiClient {
    /// Create a client over `transport` rooted at `base_url`
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        result_classifier: ResultClassifier,
        exception_classifier: ExceptionClassifier,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            result_classifier,
            exception_classifier,
            exception_override: None,
        }
    }

    /// Attach a local exception override for this data source
    pub fn with_exception_override(mut self, exception_override: Arc<dyn ExceptionOverride>) -> Self {
        self.exception_override = Some(exception_override);
        self
    }

    /// Absolute URL for a service path under the configured base URL.
    ///
    /// # Errors
    ///
    /// Rejects paths that pin an API version.
    pub fn endpoint(&self, path: &str) -> Result<String, VersionedPathError> {
        if VERSION_SEGMENT.is_match(path) {
            return Err(VersionedPathError(path.to_string()));
        }
        Ok(format!("{}{}", self.base_url, path))
    }

    /// Execute a call whose response uses the legacy enveloped shape.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, NetworkError> {
        match self.transport.send(request).await {
            Ok(response) => self.result_classifier.classify(&response).await,
            Err(failure) => Err(self.classify_failure(failure).await),
        }
    }

    /// Execute a call whose response uses the modern top-level shape.
    pub async fn call_v2<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, NetworkError> {
        match self.transport.send(request).await {
            Ok(response) => self.result_classifier.classify_v2(&response).await,
            Err(failure) => Err(self.classify_failure(failure).await),
        }
    }

    async fn classify_failure(&self, failure: TransportError) -> NetworkError {
        if let Some(exception_override) = &self.exception_override
            && let Some(error) = exception_override.handle(&failure)
        {
            return error;
        }
        self.exception_classifier
            .classify(Failure::Transport(failure))
            .await
    }
}
