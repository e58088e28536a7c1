use std::sync::atomic::{AtomicU64, Ordering};

/// Lookup counters owned by `CustomResolver`.
///
/// Only hits and misses are stored; the query total is derived from them, so
/// `total_queries == cache_hits + cache_misses` holds in every snapshot even
/// while lookups race.
#[derive(Default)]
pub struct ResolverStats {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl ResolverStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns `(total_queries, cache_hits, cache_misses)`.
    pub fn counters(&self) -> (u64, u64, u64) {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        (hits + misses, hits, misses)
    }
}
