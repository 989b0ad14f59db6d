//! Transport trait and request/response types
//!
//! Defines the generic Transport trait implemented by concrete transports
//! (HTTP via reqwest, in-memory fakes in tests).

use crate::error::{Result, TransportError};
use async_trait::async_trait;
use std::collections::HashMap;

/// Description of a single API request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,

    /// Request URL
    pub url: String,

    /// Request headers
    pub headers: HashMap<String, String>,

    /// Request body (optional)
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Create a new request
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `payload` as JSON and set it as the request body
    pub fn with_json_body<P: serde::Serialize>(mut self, payload: &P) -> Result<Self> {
        self.body = Some(serde_json::to_vec(payload)?);
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }
}

/// Response received for an [`ApiRequest`]
///
/// One envelope is produced per call and consumed exactly once by the
/// classification layer.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// Final request URL, kept for diagnostics (`instance` of error wrappers)
    pub url: String,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Create a new response
    pub fn new(
        status: u16,
        url: impl Into<String>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            status,
            url: url.into(),
            headers,
            body,
        }
    }

    /// Check if the response is successful (2xx)
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Get a header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, v)| v.as_str())
    }

    /// Encoded path of the request URL
    pub fn path(&self) -> String {
        url::Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| self.url.clone())
    }

    /// Get the response body as a string
    pub fn text(&self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    /// Parse the response body as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be parsed as valid JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| TransportError::Serialization(e.to_string()))
    }
}

/// Generic transport trait for executing described calls
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the raw response envelope
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}
