use async_trait::async_trait;
use bytes::Bytes;
use dnsprobe_application::ports::{
    HttpRequest, HttpResponse, HttpTransport, SystemResolver, UpstreamLookup,
};
use dnsprobe_domain::{DomainError, TransportError};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Debug)]
pub enum UpstreamBehavior {
    Answer(Vec<Ipv4Addr>),
    Empty,
    Fail(DomainError),
    /// Sleeps past any reasonable timeout before answering.
    Hang,
}

/// Upstream server double keyed by hostname; unknown names fail.
#[derive(Clone)]
pub struct MockUpstreamLookup {
    server: SocketAddr,
    behaviors: Arc<Mutex<HashMap<String, UpstreamBehavior>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    call_count: Arc<AtomicUsize>,
    timeouts_seen: Arc<Mutex<Vec<Duration>>>,
}

impl MockUpstreamLookup {
    pub fn new() -> Self {
        Self {
            server: "156.154.70.1:53".parse().unwrap(),
            behaviors: Arc::new(Mutex::new(HashMap::new())),
            delay: Arc::new(Mutex::new(None)),
            call_count: Arc::new(AtomicUsize::new(0)),
            timeouts_seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set(&self, hostname: &str, behavior: UpstreamBehavior) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(hostname.to_string(), behavior);
    }

    pub fn answer(&self, hostname: &str, ips: &[&str]) {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.set(hostname, UpstreamBehavior::Answer(ips));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn timeouts_seen(&self) -> Vec<Duration> {
        self.timeouts_seen.lock().unwrap().clone()
    }
}

impl Default for MockUpstreamLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamLookup for MockUpstreamLookup {
    async fn query_a(
        &self,
        hostname: &str,
        timeout: Duration,
    ) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.timeouts_seen.lock().unwrap().push(timeout);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let behavior = self.behaviors.lock().unwrap().get(hostname).cloned();
        match behavior {
            Some(UpstreamBehavior::Answer(ips)) => Ok(ips),
            Some(UpstreamBehavior::Empty) => Ok(vec![]),
            Some(UpstreamBehavior::Fail(e)) => Err(e),
            Some(UpstreamBehavior::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(vec![])
            }
            None => Err(DomainError::UpstreamUnreachable {
                server: self.server.to_string(),
                reason: format!("no mock answer for {}", hostname),
            }),
        }
    }

    fn server(&self) -> SocketAddr {
        self.server
    }
}

/// System resolver double; unknown names fail.
#[derive(Clone, Default)]
pub struct MockSystemResolver {
    answers: Arc<Mutex<HashMap<String, Vec<IpAddr>>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockSystemResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, hostname: &str, ips: &[&str]) {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.answers
            .lock()
            .unwrap()
            .insert(hostname.to_string(), ips);
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SystemResolver for MockSystemResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<IpAddr>, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .get(hostname)
            .cloned()
            .ok_or_else(|| DomainError::ResolutionFailed {
                hostname: hostname.to_string(),
            })
    }
}

/// Transport double returning a fixed outcome and recording what it saw.
pub struct MockHttpTransport {
    outcome: Result<(u16, Option<&'static str>), TransportError>,
    seen: Mutex<Vec<String>>,
}

impl MockHttpTransport {
    pub fn status(code: u16) -> Self {
        Self {
            outcome: Ok((code, None)),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn status_with_content_type(code: u16, content_type: &'static str) -> Self {
        Self {
            outcome: Ok((code, Some(content_type))),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: TransportError) -> Self {
        Self {
            outcome: Err(error),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen_urls(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request.uri().to_string());

        let (code, content_type) = self.outcome.clone()?;
        let mut builder = http::Response::builder().status(code);
        if let Some(content_type) = content_type {
            builder = builder.header(http::header::CONTENT_TYPE, content_type);
        }
        Ok(builder.body(Bytes::new()).unwrap())
    }
}
