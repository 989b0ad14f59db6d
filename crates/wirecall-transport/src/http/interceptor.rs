//! Request interceptors
//!
//! Interceptors run in order before each call leaves the transport and may
//! observe the response on the way back. Authentication header injection and
//! request/response logging live here.

use crate::error::Result;
use crate::traits::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Hook into the request/response flow of a transport.
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Process a request before it is sent.
    async fn on_request(&self, request: ApiRequest) -> Result<ApiRequest> {
        Ok(request)
    }

    /// Observe a response after it is received.
    async fn on_response(&self, _response: &ApiResponse) {}
}

/// Supplies the current access token for outgoing calls.
pub trait AuthTokenProvider: Send + Sync {
    /// The token to attach, or `None` when the session is anonymous
    fn access_token(&self) -> Option<String>;
}

/// Initializes the authentication header before each call.
pub struct AuthInterceptor {
    provider: Arc<dyn AuthTokenProvider>,
}

impl AuthInterceptor {
    /// Create an interceptor backed by `provider`
    pub fn new(provider: Arc<dyn AuthTokenProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Interceptor for AuthInterceptor {
    async fn on_request(&self, request: ApiRequest) -> Result<ApiRequest> {
        match self.provider.access_token() {
            Some(token) => Ok(request.with_header("Authorization", format!("Bearer {}", token))),
            None => Ok(request),
        }
    }
}

/// Logs request and response lines via `tracing`.
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn on_request(&self, request: ApiRequest) -> Result<ApiRequest> {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            body_bytes = request.body.as_ref().map_or(0, Vec::len),
            "--> sending request"
        );
        Ok(request)
    }

    async fn on_response(&self, response: &ApiResponse) {
        tracing::debug!(
            status = response.status,
            url = %response.url,
            body_bytes = response.body.len(),
            "<-- received response"
        );
    }
}
