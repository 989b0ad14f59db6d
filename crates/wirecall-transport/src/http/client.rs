//! HTTP transport implementation over reqwest

use crate::error::{Result, TransportError};
use crate::http::interceptor::Interceptor;
use crate::traits::{ApiRequest, ApiResponse, Transport};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Per-call timeout applied to every request.
const CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Overall budget for slow endpoints that opt out of the per-call timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2 * 60);

/// HTTP transport
///
/// Executes [`ApiRequest`]s via a shared connection pool, running the
/// configured interceptor chain around each call. The transport is read-only
/// after construction and safe to share across concurrent operations.
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<ReqwestClient>,
    interceptors: Arc<Vec<Arc<dyn Interceptor>>>,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.call_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            interceptors: Arc::new(config.interceptors),
        })
    }

    async fn try_send(&self, request: &ApiRequest, method: reqwest::Method) -> Result<ApiResponse> {
        let mut req = self.client.request(method, &request.url);

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            req = req.body(body.clone());
        }

        let response = req.send().await.map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?
            .to_vec();

        Ok(ApiResponse {
            status,
            url,
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let method_upper = request.method.to_uppercase();
        let method = match method_upper.as_str() {
            "GET" => reqwest::Method::GET,
            "POST" => reqwest::Method::POST,
            "PUT" => reqwest::Method::PUT,
            "DELETE" => reqwest::Method::DELETE,
            "PATCH" => reqwest::Method::PATCH,
            "HEAD" => reqwest::Method::HEAD,
            _ => {
                return Err(TransportError::Http(format!(
                    "Unsupported HTTP method: {}",
                    request.method
                )));
            }
        };

        let mut request = request;
        for interceptor in self.interceptors.iter() {
            request = interceptor.on_request(request).await?;
        }

        let response = self.try_send(&request, method).await?;

        for interceptor in self.interceptors.iter() {
            interceptor.on_response(&response).await;
        }

        Ok(response)
    }
}

/// HTTP transport configuration
pub struct HttpTransportConfig {
    /// Per-call timeout
    pub call_timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Interceptors, run in order on every request
    pub interceptors: Vec<Arc<dyn Interceptor>>,
}

impl HttpTransportConfig {
    /// Configuration for endpoints that need the extended timeout budget
    pub fn slow() -> Self {
        Self {
            call_timeout: DEFAULT_TIMEOUT,
            ..Default::default()
        }
    }
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            call_timeout: CALL_TIMEOUT,
            connect_timeout: CALL_TIMEOUT,
            pool_max_idle_per_host: 10,
            interceptors: Vec::new(),
        }
    }
}
