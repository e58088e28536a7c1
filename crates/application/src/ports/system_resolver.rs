use async_trait::async_trait;
use dnsprobe_domain::DomainError;
use std::net::IpAddr;

/// The platform's standard name resolution (getaddrinfo and friends).
#[async_trait]
pub trait SystemResolver: Send + Sync {
    async fn resolve(&self, hostname: &str) -> Result<Vec<IpAddr>, DomainError>;
}
