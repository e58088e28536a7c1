//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Each message is prefixed with its 2-byte big-endian length. Used only to
//! repeat a query whose UDP answer came back truncated, so connections are
//! not pooled.

use super::{timed_out, unreachable, DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnsprobe_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = 65535;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server_addr = self.server_addr;

        let exchange = async {
            let mut stream = TcpStream::connect(server_addr)
                .await
                .map_err(|e| unreachable(server_addr, "TCP connect failed", e))?;
            stream
                .set_nodelay(true)
                .map_err(|e| unreachable(server_addr, "failed to set TCP_NODELAY", e))?;

            send_with_length_prefix(&mut stream, message_bytes)
                .await
                .map_err(|e| unreachable(server_addr, "failed to send TCP query", e))?;

            debug!(
                server = %server_addr,
                message_len = message_bytes.len(),
                "TCP query sent"
            );

            read_with_length_prefix(&mut stream).await.map_err(|e| {
                unreachable(server_addr, "failed to read TCP response", e)
            })
        };

        let response_bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| timed_out(server_addr))??;

        debug!(
            server = %server_addr,
            response_len = response_bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: self.protocol_name(),
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> std::io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "DNS message too large")
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> std::io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let response_len = u16::from_be_bytes(len_buf) as usize;
    debug_assert!(response_len <= MAX_TCP_MESSAGE_SIZE);

    let mut response = vec![0u8; response_len];
    stream.read_exact(&mut response).await?;

    Ok(response)
}
