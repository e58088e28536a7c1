use dnsprobe_domain::InterceptorStatsSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};

/// Attempt counters owned by `RequestInterceptor`.
///
/// The reported total is `successful + failed`, i.e. completed attempts.
/// `started` only numbers attempts for the logs; an attempt that is still in
/// flight (or was cancelled) is not part of the total.
#[derive(Default)]
pub struct InterceptorStats {
    started: AtomicU64,
    successful: AtomicU64,
    failed: AtomicU64,
}

impl InterceptorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the 1-based sequence number of the new attempt.
    pub fn begin_request(&self) -> u64 {
        self.started.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn record_outcome(&self, success: bool) {
        if success {
            self.successful.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> InterceptorStatsSnapshot {
        let successful_requests = self.successful.load(Ordering::Relaxed);
        let failed_requests = self.failed.load(Ordering::Relaxed);
        InterceptorStatsSnapshot {
            total_requests: successful_requests + failed_requests,
            successful_requests,
            failed_requests,
        }
    }

    pub fn reset(&self) {
        self.started.store(0, Ordering::Relaxed);
        self.successful.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
    }
}
