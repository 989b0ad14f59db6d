//! Connectivity probe
//!
//! Distinguishes "the network is down" from "the server misbehaved" when a
//! call fails with an I/O error. The probe opens a private socket per check
//! and never shares state between checks.

use async_trait::async_trait;
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// Default probe target, a well-known public DNS resolver.
const PROBE_ADDR: &str = "8.8.8.8:53";

/// Upper bound for a single probe; the failure path must never block
/// indefinitely waiting on connectivity.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Reports whether a known-reachable host can currently be reached.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// `true` if an internet connection is currently available
    async fn is_connection_available(&self) -> bool;
}

/// Probe that attempts a raw TCP connection to a known host with a bounded
/// timeout.
#[derive(Debug, Clone)]
pub struct SocketProbe {
    addr: SocketAddr,
    timeout: Duration,
}

impl SocketProbe {
    /// Create a probe against a custom target
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        Self { addr, timeout }
    }
}

impl Default for SocketProbe {
    fn default() -> Self {
        Self {
            addr: PROBE_ADDR.parse().expect("static probe address is valid"),
            timeout: PROBE_TIMEOUT,
        }
    }
}

#[async_trait]
impl ConnectivityProbe for SocketProbe {
    async fn is_connection_available(&self) -> bool {
        let addr = self.addr;
        let timeout = self.timeout;

        // The connect is blocking on purpose: one bounded synchronous check,
        // moved off the async runtime threads.
        tokio::task::spawn_blocking(move || TcpStream::connect_timeout(&addr, timeout).is_ok())
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[tokio::test]
    async fn test_probe_reports_reachable_host() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
        let addr = listener.local_addr().expect("local addr");

        let probe = SocketProbe::new(addr, Duration::from_secs(1));
        assert!(probe.is_connection_available().await);
    }

    #[tokio::test]
    async fn test_probe_reports_unreachable_host() {
        // Bind then drop to get a port with nothing listening on it.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
            listener.local_addr().expect("local addr")
        };

        let probe = SocketProbe::new(addr, Duration::from_millis(500));
        assert!(!probe.is_connection_available().await);
    }
}
