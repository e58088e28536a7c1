use async_trait::async_trait;
use dnsprobe_application::ports::SystemResolver;
use dnsprobe_domain::DomainError;
use std::net::IpAddr;
use tracing::debug;

/// Platform name resolution through `getaddrinfo`, run by tokio on its
/// blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSystemResolver;

impl TokioSystemResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SystemResolver for TokioSystemResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<IpAddr>, DomainError> {
        let failed = || DomainError::ResolutionFailed {
            hostname: hostname.to_string(),
        };

        // lookup_host wants host:port; the port is discarded.
        let addrs = tokio::net::lookup_host((hostname, 0)).await.map_err(|e| {
            debug!(domain = %hostname, error = %e, "System resolver failed");
            failed()
        })?;

        let mut addresses: Vec<IpAddr> = Vec::new();
        for addr in addrs {
            let ip = addr.ip();
            if !addresses.contains(&ip) {
                addresses.push(ip);
            }
        }

        if addresses.is_empty() {
            return Err(failed());
        }

        debug!(
            domain = %hostname,
            addresses = addresses.len(),
            "System resolver answered"
        );
        Ok(addresses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolves_localhost() {
        let addresses = TokioSystemResolver::new().resolve("localhost").await.unwrap();
        assert!(addresses.iter().all(|ip| ip.is_loopback()));
    }

    #[tokio::test]
    async fn test_ip_literal_resolves_to_itself() {
        let addresses = TokioSystemResolver::new().resolve("127.0.0.1").await.unwrap();
        assert_eq!(addresses, vec![IpAddr::from([127, 0, 0, 1])]);
    }
}
