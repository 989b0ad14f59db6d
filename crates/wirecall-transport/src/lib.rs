//! Transport abstraction layer for wirecall
//!
//! Provides the trait-based transport the operation engine executes calls
//! through, plus the concrete reqwest-backed HTTP transport and the
//! connectivity probe used to tell network outages apart from server
//! failures.
//!
//! # Architecture
//!
//! - **Transport trait**: generic interface over any call mechanism
//! - **HTTP transport**: reqwest client with an interceptor chain
//! - **Connectivity probe**: bounded raw-socket reachability check
//! - **Error handling**: one transport error type across implementations

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod connectivity;
pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use connectivity::{ConnectivityProbe, SocketProbe};
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use traits::{ApiRequest, ApiResponse, Transport};
