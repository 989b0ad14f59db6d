//! Transport error types

use std::fmt;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur while executing a call against the transport layer
#[derive(Debug)]
pub enum TransportError {
    /// HTTP request/response error
    Http(String),

    /// Connection error
    Connection(String),

    /// I/O error
    Io(std::io::Error),

    /// Request timed out
    Timeout(String),

    /// The owning scope was cancelled while the call was in flight
    Cancelled(String),

    /// Serialization error
    Serialization(String),

    /// Generic transport error
    Other(String),
}

impl TransportError {
    /// Stable name of the failure kind, used for diagnostics when a failure
    /// cannot be classified any further.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Http(_) => "HttpError",
            Self::Connection(_) => "ConnectionError",
            Self::Io(_) => "IoError",
            Self::Timeout(_) => "TimeoutError",
            Self::Cancelled(_) => "CancellationError",
            Self::Serialization(_) => "SerializationError",
            Self::Other(_) => "OtherError",
        }
    }

    /// The underlying failure message, without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Http(msg)
            | Self::Connection(msg)
            | Self::Timeout(msg)
            | Self::Cancelled(msg)
            | Self::Serialization(msg)
            | Self::Other(msg) => msg.clone(),
            Self::Io(err) => err.to_string(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(msg) => write!(f, "HTTP error: {}", msg),
            Self::Connection(msg) => write!(f, "Connection error: {}", msg),
            Self::Io(err) => write!(f, "I/O error: {}", err),
            Self::Timeout(msg) => write!(f, "Timeout: {}", msg),
            Self::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
