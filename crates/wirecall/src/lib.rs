//! Declarative network-operation execution engine
//!
//! wirecall runs a remote call, classifies whatever comes back into a closed
//! error taxonomy, and drives a declarative set of lifecycle hooks around
//! the call — including a one-shot "renew credentials and retry" protocol
//! for authentication failures.
//!
//! # Architecture
//!
//! - **Error taxonomy**: the closed [`NetworkError`] set, one wrapper each
//! - **Result classifier**: response envelope → payload or typed error
//! - **Exception classifier**: transport failure → typed error
//! - **Operation executor**: lifecycle hooks + the renewal state machine
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use wirecall::{NetworkExecutor, Operation};
//!
//! let operation: Operation<Profile> = Operation::builder()
//!     .execute(move || { let api = api.clone(); async move { Ok(api.profile().await?) } })
//!     .loading(|visible| spinner.set_visible(visible))
//!     .on_success(|profile| render(profile))
//!     .on_error(|error, _data| async move { toast(error.error_message()) })
//!     .build();
//!
//! executor.launch(CancellationToken::new(), operation);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod classifier;
pub mod client;
pub mod code;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod operation;
pub mod state;
pub mod wrapper;

// Re-export commonly used types
pub use classifier::{ExceptionClassifier, ResultClassifier};
pub use client::{ApiClient, ExceptionOverride};
pub use code::{CodeKind, ErrorCode};
pub use envelope::{Envelope, GeneralResponse, Status};
pub use error::{Failure, NetworkError, OperationError};
pub use executor::NetworkExecutor;
pub use operation::{Operation, OperationBuilder};
pub use state::ErrorStateHandler;
pub use wrapper::ErrorWrapper;
