use super::redirect;
use bytes::Bytes;
use dnsprobe_application::ports::{HttpRequest, HttpResponse, HttpTransport};
use dnsprobe_application::use_cases::interceptor::RequestInterceptor;
use dnsprobe_domain::{ClientConfig, TransportError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 20;

/// HTTP client whose every physical attempt passes through the
/// [`RequestInterceptor`] and whose hostnames resolve through the custom
/// resolver.
#[derive(Clone)]
pub struct ProbeClient {
    transport: Arc<dyn HttpTransport>,
    interceptor: Arc<RequestInterceptor>,
    follow_redirects: bool,
    retry_on_connection_failure: bool,
}

impl ProbeClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        interceptor: Arc<RequestInterceptor>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            transport,
            interceptor,
            follow_redirects: config.follow_redirects,
            retry_on_connection_failure: config.retry_on_connection_failure,
        }
    }

    pub async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let request = http::Request::get(url)
            .body(Bytes::new())
            .map_err(|e| TransportError::InvalidRequest(format!("'{}': {}", url, e)))?;
        self.execute(request).await
    }

    /// Sends `request`, following redirects hop by hop when enabled.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut current = request;
        let mut hops = 0usize;

        loop {
            if !self.follow_redirects {
                return self.send_with_retry(current).await;
            }

            let previous = redirect::clone_request(&current);
            let response = self.send_with_retry(current).await?;

            let Some(location) = redirect::location(&response) else {
                return Ok(response);
            };

            if hops == MAX_REDIRECTS {
                warn!(url = %previous.uri(), limit = MAX_REDIRECTS, "Too many redirects");
                return Err(TransportError::TooManyRedirects(MAX_REDIRECTS));
            }
            hops += 1;

            let next = redirect::next_request(&previous, response.status(), location)?;
            debug!(
                from = %previous.uri(),
                to = %next.uri(),
                status = response.status().as_u16(),
                hop = hops,
                "Following redirect"
            );
            current = next;
        }
    }

    async fn send_with_retry(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let retry = self
            .retry_on_connection_failure
            .then(|| redirect::clone_request(&request));

        match self
            .interceptor
            .intercept(request, self.transport.as_ref())
            .await
        {
            Err(e) if e.is_connect() => match retry {
                Some(again) => {
                    warn!(url = %again.uri(), error = %e, "Connection failed, retrying once");
                    self.interceptor
                        .intercept(again, self.transport.as_ref())
                        .await
                }
                None => Err(e),
            },
            outcome => outcome,
        }
    }

    pub fn interceptor(&self) -> &Arc<RequestInterceptor> {
        &self.interceptor
    }
}
