#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::oneshot;

const RCODE_NOERROR: u8 = 0;
const RCODE_SERVFAIL: u8 = 2;
const RCODE_NXDOMAIN: u8 = 3;

/// How the mock answers every query it receives.
#[derive(Debug, Clone)]
pub enum MockReply {
    Answer(Vec<Ipv4Addr>),
    NxDomain,
    ServFail,
    /// UDP replies carry the TC bit and no records; TCP gets the full answer.
    Truncated(Vec<Ipv4Addr>),
    /// Reply with a transaction id that does not match the query.
    WrongId,
    /// Receive and never answer.
    Silent,
}

/// Answers DNS queries on 127.0.0.1 over UDP and TCP (same port).
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(reply: MockReply) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_counter = Arc::clone(&udp_queries);
        let tcp_counter = Arc::clone(&tcp_queries);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::udp_response(&reply, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            tcp_counter.fetch_add(1, Ordering::SeqCst);
                            tokio::spawn(Self::serve_tcp(stream, reply.clone()));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    fn udp_response(reply: &MockReply, query: &[u8]) -> Option<Vec<u8>> {
        match reply {
            MockReply::Answer(ips) => Some(Self::build_response(query, RCODE_NOERROR, false, ips)),
            MockReply::NxDomain => Some(Self::build_response(query, RCODE_NXDOMAIN, false, &[])),
            MockReply::ServFail => Some(Self::build_response(query, RCODE_SERVFAIL, false, &[])),
            MockReply::Truncated(_) => Some(Self::build_response(query, RCODE_NOERROR, true, &[])),
            MockReply::WrongId => {
                let mut response = Self::build_response(query, RCODE_NOERROR, false, &[]);
                if response.len() >= 2 {
                    response[0] ^= 0xff;
                }
                Some(response)
            }
            MockReply::Silent => None,
        }
    }

    async fn serve_tcp(mut stream: TcpStream, reply: MockReply) {
        let mut len_buf = [0u8; 2];
        if stream.read_exact(&mut len_buf).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        if stream.read_exact(&mut query).await.is_err() {
            return;
        }

        let response = match &reply {
            MockReply::Truncated(ips) | MockReply::Answer(ips) => {
                Self::build_response(&query, RCODE_NOERROR, false, ips)
            }
            other => match Self::udp_response(other, &query) {
                Some(response) => response,
                None => return,
            },
        };

        let _ = stream
            .write_all(&(response.len() as u16).to_be_bytes())
            .await;
        let _ = stream.write_all(&response).await;
    }

    /// Echoes the question and appends one IN/A record per address.
    pub fn build_response(
        query: &[u8],
        rcode: u8,
        truncated: bool,
        answers: &[Ipv4Addr],
    ) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(512);

        response.extend_from_slice(&query[0..2]);

        // QR + RD, optionally TC.
        response.push(if truncated { 0x83 } else { 0x81 });
        // RA + RCODE.
        response.push(0x80 | (rcode & 0x0f));

        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(&query[12..Self::question_end(query)]);

        for ip in answers {
            response.extend_from_slice(&[
                0xc0, 0x0c, // pointer to the question name
                0x00, 0x01, // TYPE A
                0x00, 0x01, // CLASS IN
                0x00, 0x00, 0x00, 0x3c, // TTL 60
                0x00, 0x04,
            ]);
            response.extend_from_slice(&ip.octets());
        }

        response
    }

    /// Offset just past QNAME, QTYPE and QCLASS of the first question.
    /// Anything after it (EDNS OPT) is not echoed.
    fn question_end(query: &[u8]) -> usize {
        let mut pos = 12;
        while pos < query.len() && query[pos] != 0 {
            pos += query[pos] as usize + 1;
        }
        (pos + 5).min(query.len())
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
