//! Target address resolution

use crate::error::{AppError, Result};
use std::net::SocketAddr;
use tokio::net::lookup_host;

/// A resolved probe destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// The socket address the probe will send to
    pub addr: SocketAddr,
}

impl ResolvedTarget {
    /// Human-readable address family name
    pub fn family(&self) -> &'static str {
        if self.addr.is_ipv6() {
            "IPv6"
        } else {
            "IPv4"
        }
    }

    /// Wildcard bind address matching this target's family
    pub fn bind_addr(&self) -> &'static str {
        if self.addr.is_ipv6() {
            "[::]:0"
        } else {
            "0.0.0.0:0"
        }
    }
}

/// Resolve `host:port` to a socket address, taking the first result.
///
/// Failure here is fatal to the run: nothing has been sent yet, so the
/// session never leaves the idle phase.
pub async fn resolve_target(host: &str, port: u16) -> Result<ResolvedTarget> {
    let mut addrs = lookup_host((host, port))
        .await
        .map_err(|e| AppError::resolution(format!("Failed to resolve {}:{} - {}", host, port, e)))?;

    match addrs.next() {
        Some(addr) => Ok(ResolvedTarget { addr }),
        None => Err(AppError::resolution(format!(
            "Could not resolve hostname: {}",
            host
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_ipv4_literal() {
        let target = resolve_target("127.0.0.1", 4000).await.unwrap();
        assert_eq!(target.addr.port(), 4000);
        assert_eq!(target.family(), "IPv4");
        assert_eq!(target.bind_addr(), "0.0.0.0:0");
    }

    #[tokio::test]
    async fn test_resolve_ipv6_literal() {
        let target = resolve_target("::1", 4000).await.unwrap();
        assert_eq!(target.family(), "IPv6");
        assert_eq!(target.bind_addr(), "[::]:0");
    }

    #[tokio::test]
    async fn test_resolve_failure_is_resolution_error() {
        let err = resolve_target("definitely-not-a-real-host.invalid", 4000)
            .await
            .unwrap_err();
        assert_eq!(err.category(), "RESOLVE");
        assert!(!err.is_recoverable());
    }
}
