use async_trait::async_trait;
use dnsprobe_domain::DomainError;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Direct A-record queries against one configured name server, bypassing the
/// operating system resolver.
#[async_trait]
pub trait UpstreamLookup: Send + Sync {
    /// Returns the A records of the answer section. An answer without A
    /// records is `Ok(vec![])`, not an error.
    async fn query_a(
        &self,
        hostname: &str,
        timeout: Duration,
    ) -> Result<Vec<Ipv4Addr>, DomainError>;

    fn server(&self) -> SocketAddr;
}
