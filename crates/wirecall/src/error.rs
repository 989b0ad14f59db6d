//! Network error taxonomy
//!
//! The closed set of typed errors every failure path terminates in. Each
//! variant wraps exactly one [`ErrorWrapper`]; variants with extra identity
//! fields carry them alongside. Errors are created at classification time,
//! propagated as the failure signal for exactly one attempt, and never
//! mutated.

use crate::code::ErrorCode;
use crate::wrapper::ErrorWrapper;
use thiserror::Error;
use wirecall_transport::TransportError;

/// Diagnostic exception name used when an error was not mapped from a
/// concrete transport failure.
pub(crate) const UNKNOWN_EXCEPTION: &str = "UnknownError";

/// Typed network error.
///
/// `Unknown` is the only catch-all; it preserves the raw wire error code and
/// the originating failure's type name for diagnosis.
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    /// The user's identity document is expired or inactive
    #[error("document expired: {}", .data.error_message())]
    DocumentExpired {
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// The installed client version can no longer talk to the server
    #[error("application update required: {}", .data.error_message())]
    UpdateRequired {
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// The session is no longer authorized
    #[error("unauthorized: {}", .data.error_message())]
    Unauthorized {
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// Unauthorized with a user-level cause (blocked account, password
    /// changed elsewhere)
    #[error("unauthorized, user details changed: {}", .data.error_message())]
    UnauthorizedUserDetails {
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// The server failed to process the call
    #[error("internal server error: {}", .data.error_message())]
    InternalServer {
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// The call did not complete within the timeout budget
    #[error("server timeout: {}", .data.error_message())]
    ServerTimeout {
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// No internet connectivity
    #[error("no connection: {}", .data.error_message())]
    NoConnection {
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// The operation requires a strong-authentication code
    #[error("strong authentication required: {}", .data.error_message())]
    StrongAuthentication {
        /// Authenticated-action id from the response headers
        auth_id: String,
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// The operation requires a liveness check on this untrusted device
    #[error("untrusted device liveness check required: {}", .data.error_message())]
    UntrustedDeviceLiveness {
        /// Authentication code, absent when the server sent none
        auth_id: Option<String>,
        /// User id from the response headers
        user_id: String,
        /// User name from the response headers
        user_name: String,
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// The owning scope was cancelled while the call was in flight
    #[error("operation cancelled: {}", .data.error_message())]
    JobCancellation {
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// The operation requires SCA confirmation
    #[error("sca code required: {}", .data.error_message())]
    ScaCodeRequired {
        /// Requirement list from the response headers
        requirements: Option<String>,
        /// Trace id from the response headers
        trace_id: Option<String>,
        /// Server-reported error metadata
        data: ErrorWrapper,
    },

    /// A failure no other variant covers
    #[error("unknown network error [{initial_error_code}]: {}", .data.error_message())]
    Unknown {
        /// Server-reported error metadata
        data: ErrorWrapper,
        /// Wire error code before it was cast to unknown
        initial_error_code: String,
        /// Failure type name before it was mapped to unknown
        initial_exception_name: String,
    },
}

impl NetworkError {
    /// The error wrapper every variant carries.
    pub fn wrapper(&self) -> &ErrorWrapper {
        match self {
            Self::DocumentExpired { data }
            | Self::UpdateRequired { data }
            | Self::Unauthorized { data }
            | Self::UnauthorizedUserDetails { data }
            | Self::InternalServer { data }
            | Self::ServerTimeout { data }
            | Self::NoConnection { data }
            | Self::StrongAuthentication { data, .. }
            | Self::UntrustedDeviceLiveness { data, .. }
            | Self::JobCancellation { data }
            | Self::ScaCodeRequired { data, .. }
            | Self::Unknown { data, .. } => data,
        }
    }

    /// The error message, falling back to the sentinel.
    pub fn error_message(&self) -> &str {
        self.wrapper().error_message()
    }

    /// The resolved error code.
    pub fn error_code(&self) -> &ErrorCode {
        &self.wrapper().error_code
    }

    /// `true` for the unauthorized family, the only renewable failures.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::UnauthorizedUserDetails { .. }
        )
    }

    /// Unknown error with defaulted diagnostics.
    pub fn unknown(data: ErrorWrapper) -> Self {
        Self::Unknown {
            data,
            initial_error_code: ErrorCode::unknown().raw().to_string(),
            initial_exception_name: UNKNOWN_EXCEPTION.to_string(),
        }
    }
}

/// A raw failure entering classification: either a transport-level failure
/// or an error that was already classified (classification is idempotent on
/// its own output).
#[derive(Debug, Error)]
pub enum Failure {
    /// Already-typed network error, passed through unchanged
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Opaque transport failure awaiting classification
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Defects of the operation machinery itself, as opposed to failures of the
/// remote call. These are surfaced to the caller, never swallowed.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The descriptor was built without an execution closure
    #[error("operation descriptor has no execution closure")]
    MissingExecution,

    /// The caller-declared error payload could not be decoded from the
    /// wrapper's extensions
    #[error("failed to decode typed error payload: {0}")]
    ErrorDataDecode(#[from] serde_json::Error),
}
