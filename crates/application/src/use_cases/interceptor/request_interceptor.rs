use super::stats::InterceptorStats;
use crate::ports::{HttpRequest, HttpResponse, HttpTransport};
use dnsprobe_domain::{InterceptorStatsSnapshot, TransportError};
use http::header::CONTENT_TYPE;
use http::StatusCode;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Decides whether a completed exchange counts as successful.
pub type SuccessPredicate = fn(StatusCode) -> bool;

/// 2xx and 3xx count as success.
pub fn default_success_predicate(status: StatusCode) -> bool {
    status.is_success() || status.is_redirection()
}

/// Observes every physical HTTP attempt: logs it, times it, counts it.
///
/// Never alters the outcome. Transport errors are counted as failures and
/// handed back to the caller as the same value.
pub struct RequestInterceptor {
    stats: InterceptorStats,
    is_successful: SuccessPredicate,
}

impl Default for RequestInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestInterceptor {
    pub fn new() -> Self {
        Self::with_success_predicate(default_success_predicate)
    }

    pub fn with_success_predicate(is_successful: SuccessPredicate) -> Self {
        Self {
            stats: InterceptorStats::new(),
            is_successful,
        }
    }

    /// Runs one attempt through `next`, which performs the network call.
    pub async fn intercept(
        &self,
        request: HttpRequest,
        next: &dyn HttpTransport,
    ) -> Result<HttpResponse, TransportError> {
        let request_id = self.stats.begin_request();
        let host = request.uri().host().unwrap_or_default().to_string();

        debug!(
            request_id,
            method = %request.method(),
            host = %host,
            url = %request.uri(),
            "→ Request"
        );

        let start = Instant::now();

        match next.send(request).await {
            Ok(response) => {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                let status = response.status();
                let success = (self.is_successful)(status);
                self.stats.record_outcome(success);

                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                debug!(
                    request_id,
                    code = status.as_u16(),
                    message = status.canonical_reason().unwrap_or(""),
                    success,
                    elapsed_ms,
                    content_type,
                    "← Response"
                );

                Ok(response)
            }
            Err(e) => {
                self.stats.record_outcome(false);
                warn!(
                    request_id,
                    host = %host,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "✗ Request FAILED"
                );
                Err(e)
            }
        }
    }

    pub fn stats_snapshot(&self) -> InterceptorStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn get_stats(&self) -> String {
        self.stats_snapshot().to_string()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
        info!("Network statistics reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_predicate() {
        assert!(default_success_predicate(StatusCode::OK));
        assert!(default_success_predicate(StatusCode::NO_CONTENT));
        assert!(default_success_predicate(StatusCode::FOUND));
        assert!(!default_success_predicate(StatusCode::NOT_FOUND));
        assert!(!default_success_predicate(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!default_success_predicate(StatusCode::CONTINUE));
    }
}
