//! Error wrapper
//!
//! Normalized carrier of server-reported error metadata. Deserialized from
//! modern error bodies, or fabricated locally when the server returned no
//! usable body.

use crate::code::ErrorCode;
use crate::constants::UNKNOWN_ERROR;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Server-reported error metadata used to construct typed errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorWrapper {
    /// Server-side trace id
    #[serde(default)]
    pub trace_id: Option<String>,

    /// Endpoint of the external system the failure originated from
    #[serde(default)]
    pub external_endpoint: Option<String>,

    /// Field-level validation failures
    #[serde(default)]
    pub validation_errors: Option<HashMap<String, Vec<String>>>,

    /// Resolved error code; carries the raw wire `type` string
    #[serde(rename = "type")]
    pub error_code: ErrorCode,

    /// Short human-readable summary
    #[serde(default)]
    pub title: Option<String>,

    /// HTTP status the server reported in the body
    #[serde(default)]
    pub status: Option<u16>,

    /// Human-readable explanation of this occurrence
    #[serde(default)]
    pub detail: Option<String>,

    /// Request path the failure occurred on
    #[serde(default)]
    pub instance: Option<String>,

    /// Lazily-decoded error payload, interpreted under a caller-declared type
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

impl ErrorWrapper {
    /// Fabricate a wrapper when the server returned no usable error body.
    pub fn empty(message: Option<String>, error_code: ErrorCode, instance: Option<String>) -> Self {
        Self {
            trace_id: None,
            external_endpoint: None,
            validation_errors: None,
            error_code,
            title: None,
            status: None,
            detail: message,
            instance,
            extensions: None,
        }
    }

    /// Wrapper with no metadata at all, carrying the unknown sentinel code.
    pub fn unknown() -> Self {
        Self::empty(None, ErrorCode::unknown(), None)
    }

    /// The error message, falling back to the sentinel when the server sent
    /// no detail.
    pub fn error_message(&self) -> &str {
        self.detail.as_deref().unwrap_or(UNKNOWN_ERROR)
    }

    /// Decode the `extensions` payload under the caller-declared type `E`.
    ///
    /// Returns `Ok(None)` when the server attached no payload. A present but
    /// malformed payload is an error the caller must surface.
    pub fn error_data<E: DeserializeOwned>(&self) -> Result<Option<E>, serde_json::Error> {
        match &self.extensions {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some),
        }
    }
}
