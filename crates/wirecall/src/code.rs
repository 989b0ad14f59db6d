//! Server error codes
//!
//! The backend speaks two vocabularies: the legacy envelope status types and
//! the modern problem-type strings. A wire value is resolved against the
//! legacy table first, then the modern table, and finally falls back to the
//! unknown sentinel. Codes are only ever looked up, never invented.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Semantic meaning of a server error code, shared by both vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
    /// The call succeeded
    Success,
    /// Session is not authorized
    Unauthorized,
    /// The user account is blocked
    UserBlocked,
    /// The user password was changed elsewhere
    UserPasswordChanged,
    /// Server-side failure
    InternalServerError,
    /// The client version is too old to talk to this server
    UpdateRequired,
    /// Identity document expired, transfer flow
    DocumentExpiredTransfer,
    /// Identity document expired, product flow
    DocumentExpiredProduct,
    /// Identity document inactive, transfer flow
    DocumentInactiveTransfer,
    /// Identity document inactive, product flow
    DocumentInactiveProduct,
    /// Identity document is about to expire
    DocumentExpires,
    /// Identity document expired
    DocumentExpired,
    /// Operation requires a strong-authentication code
    AuthenticationCodeRequired,
    /// Operation requires a liveness check on an untrusted device
    UntrustedDeviceLivenessCheckRequired,
    /// Operation requires SCA confirmation
    ScaCodeRequired,
    /// Synthetic code for failures raised below the protocol layer
    GeneralHttpException,
    /// Not registered in either vocabulary
    Unknown,
}

/// Legacy vocabulary: envelope `status.type` values and the HTTP status
/// strings the engine falls back to when an error body is absent.
const LEGACY_CODES: &[(&str, CodeKind)] = &[
    ("success", CodeKind::Success),
    ("401", CodeKind::Unauthorized),
    ("INTERNAL_SERVER_ERROR", CodeKind::InternalServerError),
    ("UPDATE_REQUIRED", CodeKind::UpdateRequired),
    ("USER_BLOCKED", CodeKind::UserBlocked),
    ("USER_PASSWORD_CHANGED", CodeKind::UserPasswordChanged),
    ("EXISTING_DOCUMENT_EXPIRED_TRANSFER", CodeKind::DocumentExpiredTransfer),
    ("EXISTING_DOCUMENT_EXPIRED_PRODUCT", CodeKind::DocumentExpiredProduct),
    ("EXISTING_DOCUMENT_INACTIVE_TRANSFER", CodeKind::DocumentInactiveTransfer),
    ("EXISTING_DOCUMENT_INACTIVE_PRODUCT", CodeKind::DocumentInactiveProduct),
    ("EXISTING_DOCUMENT_EXPIRES", CodeKind::DocumentExpires),
    ("EXISTING_DOCUMENT_EXPIRED", CodeKind::DocumentExpired),
    ("AUTHENTICATION_CODE_REQUIRED", CodeKind::AuthenticationCodeRequired),
    (
        "UNTRUSTED_DEVICE_LIVENESS_CHECK_REQUIRED",
        CodeKind::UntrustedDeviceLivenessCheckRequired,
    ),
    ("SCA_CODE_REQUIRED", CodeKind::ScaCodeRequired),
    ("GENERAL_HTTP_EXCEPTION", CodeKind::GeneralHttpException),
    ("UNKNOWN_ERROR", CodeKind::Unknown),
];

/// Modern vocabulary: problem-type strings carried in the `type` field of
/// error bodies.
const MODERN_CODES: &[(&str, CodeKind)] = &[
    ("Unauthorized", CodeKind::Unauthorized),
    ("UserBlocked", CodeKind::UserBlocked),
    ("UserPasswordChanged", CodeKind::UserPasswordChanged),
    ("InternalServerError", CodeKind::InternalServerError),
    ("UpdateRequired", CodeKind::UpdateRequired),
    ("ExistingDocumentExpiredTransfer", CodeKind::DocumentExpiredTransfer),
    ("ExistingDocumentExpiredProduct", CodeKind::DocumentExpiredProduct),
    ("ExistingDocumentInactiveTransfer", CodeKind::DocumentInactiveTransfer),
    ("ExistingDocumentInactiveProduct", CodeKind::DocumentInactiveProduct),
    ("ExistingDocumentExpires", CodeKind::DocumentExpires),
    ("ExistingDocumentExpired", CodeKind::DocumentExpired),
    ("AuthenticationCodeRequired", CodeKind::AuthenticationCodeRequired),
    (
        "UntrustedDeviceLivenessCheckRequired",
        CodeKind::UntrustedDeviceLivenessCheckRequired,
    ),
    ("ScaCodeRequired", CodeKind::ScaCodeRequired),
];

/// A resolved server error code.
///
/// Keeps the raw wire value alongside its semantic kind so that diagnostics
/// never lose the original string, even when it resolved to [`CodeKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode {
    raw: String,
    kind: CodeKind,
}

impl ErrorCode {
    /// Resolve a wire value: legacy table first, then modern, then unknown.
    pub fn resolve(raw: &str) -> Self {
        let kind = LEGACY_CODES
            .iter()
            .chain(MODERN_CODES.iter())
            .find(|(value, _)| *value == raw)
            .map(|(_, kind)| *kind)
            .unwrap_or(CodeKind::Unknown);

        Self {
            raw: raw.to_string(),
            kind,
        }
    }

    /// Canonical code for `kind`, used when a wrapper is fabricated locally.
    pub fn from_kind(kind: CodeKind) -> Self {
        let raw = LEGACY_CODES
            .iter()
            .find(|(_, k)| *k == kind)
            .map(|(value, _)| *value)
            .unwrap_or("UNKNOWN_ERROR");

        Self {
            raw: raw.to_string(),
            kind,
        }
    }

    /// The unknown sentinel.
    pub fn unknown() -> Self {
        Self::from_kind(CodeKind::Unknown)
    }

    /// The synthetic code carried by wrappers fabricated for transport
    /// failures.
    pub fn general_http_exception() -> Self {
        Self::from_kind(CodeKind::GeneralHttpException)
    }

    /// The raw wire value this code was resolved from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Semantic kind.
    pub fn kind(&self) -> CodeKind {
        self.kind
    }

    /// `true` for the six document-lifecycle codes.
    pub fn is_document_lifecycle(&self) -> bool {
        matches!(
            self.kind,
            CodeKind::DocumentExpiredTransfer
                | CodeKind::DocumentExpiredProduct
                | CodeKind::DocumentInactiveTransfer
                | CodeKind::DocumentInactiveProduct
                | CodeKind::DocumentExpires
                | CodeKind::DocumentExpired
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::resolve(&raw))
    }
}
