//! HTTP transport over reqwest

mod client;
pub mod interceptor;

pub use client::{HttpTransport, HttpTransportConfig};
pub use interceptor::{AuthInterceptor, AuthTokenProvider, Interceptor, LoggingInterceptor};
