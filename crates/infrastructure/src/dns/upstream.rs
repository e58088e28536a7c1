use super::forwarding::{MessageBuilder, ResponseParser, UpstreamAnswer};
use super::transport::tcp::TcpTransport;
use super::transport::udp::UdpTransport;
use super::transport::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnsprobe_application::ports::UpstreamLookup;
use dnsprobe_domain::DomainError;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};
use tracing::debug;

/// Queries one name server directly over UDP, repeating the query over TCP
/// when the UDP answer is truncated.
pub struct UdpUpstreamLookup {
    server: SocketAddr,
    udp: UdpTransport,
    tcp: TcpTransport,
}

impl UdpUpstreamLookup {
    pub fn new(server: SocketAddr) -> Self {
        Self {
            server,
            udp: UdpTransport::new(server),
            tcp: TcpTransport::new(server),
        }
    }

    async fn exchange(
        &self,
        transport: &dyn DnsTransport,
        query_id: u16,
        query_bytes: &[u8],
        timeout: Duration,
    ) -> Result<UpstreamAnswer, DomainError> {
        let TransportResponse {
            bytes,
            protocol_used,
        } = transport.send(query_bytes, timeout).await?;

        match ResponseParser::transaction_id(&bytes) {
            Some(id) if id == query_id => {}
            other => {
                return Err(DomainError::InvalidDnsResponse(format!(
                    "{} reply id {:?} does not match query id {}",
                    protocol_used, other, query_id
                )));
            }
        }

        ResponseParser::parse(&bytes)
    }
}

#[async_trait]
impl UpstreamLookup for UdpUpstreamLookup {
    async fn query_a(
        &self,
        hostname: &str,
        timeout: Duration,
    ) -> Result<Vec<Ipv4Addr>, DomainError> {
        let (query_id, query_bytes) = MessageBuilder::build_a_query(hostname)?;
        let start = Instant::now();

        let mut answer = self
            .exchange(&self.udp, query_id, &query_bytes, timeout)
            .await?;

        if answer.truncated {
            let remaining = timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return Err(DomainError::UpstreamTimeout {
                    server: self.server.to_string(),
                });
            }

            debug!(
                domain = %hostname,
                server = %self.server,
                "UDP answer truncated, retrying over TCP"
            );
            answer = self
                .exchange(&self.tcp, query_id, &query_bytes, remaining)
                .await?;
        }

        if answer.is_server_error() {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} answered {}",
                self.server,
                ResponseParser::rcode_to_status(answer.rcode)
            )));
        }

        debug!(
            domain = %hostname,
            server = %self.server,
            rcode = ResponseParser::rcode_to_status(answer.rcode),
            addresses = answer.a_records.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream answered"
        );

        // NXDOMAIN and NODATA both come back as an empty list.
        Ok(answer.a_records)
    }

    fn server(&self) -> SocketAddr {
        self.server
    }
}
