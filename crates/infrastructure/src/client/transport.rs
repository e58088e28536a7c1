use super::dns_adapter::ResolverDns;
use async_trait::async_trait;
use dnsprobe_application::ports::{HttpRequest, HttpResponse, HttpTransport};
use dnsprobe_application::use_cases::resolver::CustomResolver;
use dnsprobe_domain::{ClientConfig, DomainError, TransportError};
use reqwest::redirect::Policy;
use std::sync::Arc;

/// One physical HTTP exchange over reqwest.
///
/// Redirects are disabled here and followed by [`super::ProbeClient`], and
/// hostnames resolve through the custom resolver.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig, resolver: Arc<CustomResolver>) -> Result<Self, DomainError> {
        // reqwest has no write-phase timeout; the overall budget covers it.
        let total = config.connect_timeout() + config.write_timeout() + config.read_timeout();

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .dns_resolver(Arc::new(ResolverDns::new(resolver)))
            .redirect(Policy::none())
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .timeout(total)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn map_error(host: &str, err: reqwest::Error) -> TransportError {
        // Resolver failures surface as connect errors; they are terminal.
        if let Some(resolution) = resolution_failure(&err) {
            TransportError::Resolution(resolution)
        } else if err.is_connect() {
            TransportError::Connect {
                host: host.to_string(),
                reason: error_chain(&err),
            }
        } else if err.is_timeout() {
            TransportError::Timeout {
                host: host.to_string(),
            }
        } else if err.is_builder() {
            TransportError::InvalidRequest(error_chain(&err))
        } else {
            TransportError::Other(error_chain(&err))
        }
    }
}

/// The [`DomainError`] raised by [`ResolverDns`], if it is in `err`'s
/// source chain.
fn resolution_failure(err: &(dyn std::error::Error + 'static)) -> Option<DomainError> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(domain) = cause.downcast_ref::<DomainError>() {
            return Some(domain.clone());
        }
        source = cause.source();
    }
    None
}

/// reqwest's top-level message hides the cause ("error sending request");
/// the sources carry the useful part.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let host = request.uri().host().unwrap_or_default().to_string();

        let request = reqwest::Request::try_from(request)
            .map_err(|e| TransportError::InvalidRequest(error_chain(&e)))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Self::map_error(&host, e))?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&host, e))?;

        let mut converted = http::Response::new(body);
        *converted.status_mut() = status;
        *converted.version_mut() = version;
        *converted.headers_mut() = headers;
        Ok(converted)
    }
}
