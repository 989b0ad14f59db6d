//! Wire-level constants shared across the engine

use std::time::Duration;

/// Sentinel used wherever a server-supplied message or header is absent.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Header carrying the authenticated-action id for strong authentication.
pub const AUTHENTICATION_HEADER_ID: &str = "AuthenticatedActionId";

/// Header carrying the display name of the user behind an untrusted device.
pub const UNTRUSTED_USER_NAME: &str = "username";

/// Header carrying the id of the user behind an untrusted device.
pub const UNTRUSTED_USER_ID: &str = "userid";

/// Header carrying the authentication code of an untrusted-device check.
pub const UNTRUSTED_AUTH_ID: &str = "authenticationcode";

/// Header carrying the SCA requirement list.
pub const SCA_REQUIREMENTS_ID: &str = "X-Sca-Requirements";

/// Header carrying the server-side trace id.
pub const TRACE_ID: &str = "x-trace-id";

/// Settle delay after dispatching a document-lifecycle notification, long
/// enough for the resulting dialog to render before the call resolves.
pub const DOCUMENT_ACTION_SETTLE: Duration = Duration::from_millis(1000);
