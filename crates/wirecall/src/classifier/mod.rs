//! Failure classification
//!
//! Two classifiers cover the two ways a call can go wrong: the result
//! classifier inspects structured responses, the exception classifier maps
//! transport-level failures. Both terminate in exactly one taxonomy member.

mod exception;
mod result;

pub use exception::ExceptionClassifier;
pub use result::ResultClassifier;
