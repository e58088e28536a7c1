pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use dnsprobe_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// Maps an I/O failure towards `server` onto the upstream error taxonomy.
pub(crate) fn unreachable(server: SocketAddr, context: &str, err: std::io::Error) -> DomainError {
    DomainError::UpstreamUnreachable {
        server: server.to_string(),
        reason: format!("{}: {}", context, err),
    }
}

pub(crate) fn timed_out(server: SocketAddr) -> DomainError {
    DomainError::UpstreamTimeout {
        server: server.to_string(),
    }
}
