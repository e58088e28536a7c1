use async_trait::async_trait;
use bytes::Bytes;
use dnsprobe_domain::TransportError;

pub type HttpRequest = http::Request<Bytes>;
pub type HttpResponse = http::Response<Bytes>;

/// Performs exactly one physical HTTP exchange: no redirects, no retries.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
