//! Result classifier
//!
//! Turns a raw response envelope into the success payload or exactly one
//! typed error. Supports the legacy enveloped shape (`classify`) and the
//! modern shape where the payload is the top-level body (`classify_v2`);
//! both shapes share one failed-flow dispatch via the unified [`ErrorCode`].

use crate::code::{CodeKind, ErrorCode};
use crate::constants::{
    AUTHENTICATION_HEADER_ID, DOCUMENT_ACTION_SETTLE, SCA_REQUIREMENTS_ID, TRACE_ID,
    UNKNOWN_ERROR, UNTRUSTED_AUTH_ID, UNTRUSTED_USER_ID, UNTRUSTED_USER_NAME,
};
use crate::envelope::Envelope;
use crate::error::{NetworkError, UNKNOWN_EXCEPTION};
use crate::state::ErrorStateHandler;
use crate::wrapper::ErrorWrapper;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use wirecall_transport::ApiResponse;

/// Classifies structured responses into payloads or typed errors.
#[derive(Clone)]
pub struct ResultClassifier {
    error_state: Arc<dyn ErrorStateHandler>,
}

impl ResultClassifier {
    /// Create a classifier reporting global actions to `error_state`
    pub fn new(error_state: Arc<dyn ErrorStateHandler>) -> Self {
        Self { error_state }
    }

    /// Classify a legacy enveloped response.
    ///
    /// The body is an [`Envelope`]; the envelope's `status.type` decides the
    /// outcome even when the HTTP status was successful.
    pub async fn classify<T: DeserializeOwned>(
        &self,
        response: &ApiResponse,
    ) -> Result<T, NetworkError> {
        if response.is_success() {
            let envelope = Self::decode::<Envelope<T>>(&response.body, response)?;
            self.successful_flow(envelope, response).await
        } else {
            // Legacy error responses carry no envelope; the HTTP status
            // string stands in for the error code.
            let initial_error_code = response.status.to_string();
            let wrapper = ErrorWrapper::empty(
                None,
                ErrorCode::resolve(&initial_error_code),
                Some(response.path()),
            );
            self.failed_flow(None, wrapper, response, initial_error_code)
                .await
        }
    }

    /// Classify a modern response where the payload is the top-level body.
    ///
    /// An empty body on success maps to the unit result. Error bodies are
    /// deserialized as [`ErrorWrapper`] directly, falling back to a
    /// locally-synthesized wrapper when the body is empty.
    pub async fn classify_v2<T: DeserializeOwned>(
        &self,
        response: &ApiResponse,
    ) -> Result<T, NetworkError> {
        if response.is_success() {
            if response.body.is_empty() {
                return Self::decode(b"null", response);
            }
            return Self::decode(&response.body, response);
        }

        let wrapper = if response.body.is_empty() {
            ErrorWrapper::empty(None, ErrorCode::unknown(), Some(response.path()))
        } else {
            Self::decode::<ErrorWrapper>(&response.body, response)?
        };

        let initial_error_code = wrapper.error_code.raw().to_string();
        self.failed_flow(None, wrapper, response, initial_error_code)
            .await
    }

    /// Executed when the HTTP layer reported success; the envelope status
    /// still decides whether the call actually succeeded.
    async fn successful_flow<T>(
        &self,
        envelope: Envelope<T>,
        response: &ApiResponse,
    ) -> Result<T, NetworkError> {
        let Envelope { status, data } = envelope;
        let code = ErrorCode::resolve(&status.kind);

        match code.kind() {
            CodeKind::Success => data.ok_or_else(|| NetworkError::Unknown {
                // A success status with no payload is a server contract
                // violation, never a silent null.
                data: ErrorWrapper::empty(
                    Some(status.message),
                    code,
                    Some(response.path()),
                ),
                initial_error_code: status.kind,
                initial_exception_name: UNKNOWN_EXCEPTION.to_string(),
            }),
            _ => {
                let wrapper =
                    ErrorWrapper::empty(Some(status.message), code, Some(response.path()));
                self.failed_flow(data, wrapper, response, status.kind).await
            }
        }
    }

    /// Shared failure dispatch for both response shapes.
    async fn failed_flow<T>(
        &self,
        data: Option<T>,
        wrapper: ErrorWrapper,
        response: &ApiResponse,
        initial_error_code: String,
    ) -> Result<T, NetworkError> {
        match wrapper.error_code.kind() {
            CodeKind::Unauthorized | CodeKind::UserBlocked | CodeKind::UserPasswordChanged => {
                Err(Self::unauthorized_error(wrapper))
            }

            CodeKind::InternalServerError => Err(NetworkError::InternalServer { data: wrapper }),

            CodeKind::UpdateRequired => Err(NetworkError::UpdateRequired { data: wrapper }),

            CodeKind::DocumentExpiredTransfer
            | CodeKind::DocumentExpiredProduct
            | CodeKind::DocumentInactiveTransfer
            | CodeKind::DocumentInactiveProduct
            | CodeKind::DocumentExpires
            | CodeKind::DocumentExpired => self.document_flow(data, &wrapper).await,

            CodeKind::AuthenticationCodeRequired => Err(NetworkError::StrongAuthentication {
                auth_id: Self::header_or_sentinel(response, AUTHENTICATION_HEADER_ID),
                data: wrapper,
            }),

            CodeKind::UntrustedDeviceLivenessCheckRequired => {
                Err(NetworkError::UntrustedDeviceLiveness {
                    auth_id: response.header(UNTRUSTED_AUTH_ID).map(String::from),
                    user_id: Self::header_or_sentinel(response, UNTRUSTED_USER_ID),
                    user_name: Self::header_or_sentinel(response, UNTRUSTED_USER_NAME),
                    data: wrapper,
                })
            }

            CodeKind::ScaCodeRequired => Err(NetworkError::ScaCodeRequired {
                requirements: response.header(SCA_REQUIREMENTS_ID).map(String::from),
                trace_id: response.header(TRACE_ID).map(String::from),
                data: wrapper,
            }),

            _ => Err(NetworkError::Unknown {
                data: wrapper,
                initial_error_code,
                initial_exception_name: UNKNOWN_EXCEPTION.to_string(),
            }),
        }
    }

    /// Document-lifecycle codes notify the error-state collaborator, give
    /// the resulting dialog time to render, and then still resolve the call
    /// with the payload when the server sent one.
    async fn document_flow<T>(
        &self,
        data: Option<T>,
        wrapper: &ErrorWrapper,
    ) -> Result<T, NetworkError> {
        self.error_state
            .handle_global_action(&wrapper.error_code, wrapper.error_message())
            .await;
        tokio::time::sleep(DOCUMENT_ACTION_SETTLE).await;

        data.ok_or_else(|| NetworkError::DocumentExpired {
            data: ErrorWrapper::unknown(),
        })
    }

    /// Unauthorized with a user-level cause maps to the details variant.
    fn unauthorized_error(wrapper: ErrorWrapper) -> NetworkError {
        if matches!(
            wrapper.error_code.kind(),
            CodeKind::UserBlocked | CodeKind::UserPasswordChanged
        ) {
            NetworkError::UnauthorizedUserDetails { data: wrapper }
        } else {
            NetworkError::Unauthorized { data: wrapper }
        }
    }

    fn header_or_sentinel(response: &ApiResponse, name: &str) -> String {
        response
            .header(name)
            .unwrap_or(UNKNOWN_ERROR)
            .to_string()
    }

    fn decode<T: DeserializeOwned>(body: &[u8], response: &ApiResponse) -> Result<T, NetworkError> {
        serde_json::from_slice(body).map_err(|err| NetworkError::Unknown {
            data: ErrorWrapper::empty(
                Some(err.to_string()),
                ErrorCode::general_http_exception(),
                Some(response.path()),
            ),
            initial_error_code: ErrorCode::unknown().raw().to_string(),
            initial_exception_name: "SerializationError".to_string(),
        })
    }
}
