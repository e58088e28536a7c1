use super::cache::ResolverCache;
use super::stats::ResolverStats;
use crate::ports::{SystemResolver, UpstreamLookup};
use dnsprobe_domain::{
    DomainError, Resolution, ResolutionSource, ResolvedAddressSet, ResolverStatsSnapshot,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const UPSTREAM_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);
pub const HEALTH_CHECK_HOSTNAME: &str = "google.com";

/// Resolver that prefers one upstream name server and falls back to the
/// system resolver.
///
/// Only upstream answers are cached, and they never expire. Fallback answers
/// are returned but not stored, so the next lookup of the same name goes back
/// to the upstream server first.
pub struct CustomResolver {
    upstream: Arc<dyn UpstreamLookup>,
    fallback: Arc<dyn SystemResolver>,
    cache: ResolverCache,
    stats: ResolverStats,
}

impl CustomResolver {
    pub fn new(upstream: Arc<dyn UpstreamLookup>, fallback: Arc<dyn SystemResolver>) -> Self {
        info!(upstream = %upstream.server(), "Custom resolver created");

        Self {
            upstream,
            fallback,
            cache: ResolverCache::new(),
            stats: ResolverStats::new(),
        }
    }

    pub fn upstream_server(&self) -> SocketAddr {
        self.upstream.server()
    }

    pub async fn lookup(&self, hostname: &str) -> Result<Resolution, DomainError> {
        debug!(domain = %hostname, "DNS query");

        if let Some(addresses) = self.cache.get(hostname) {
            self.stats.record_hit();
            debug!(domain = %hostname, addresses = addresses.len(), "Cache HIT");
            return Ok(Resolution::new(addresses, ResolutionSource::Cache));
        }

        self.stats.record_miss();
        debug!(
            domain = %hostname,
            upstream = %self.upstream.server(),
            "Cache MISS, querying upstream"
        );

        match self.query_upstream(hostname, UPSTREAM_LOOKUP_TIMEOUT).await {
            Ok(addresses) => {
                self.cache.insert(hostname, addresses.clone());
                debug!(
                    domain = %hostname,
                    addresses = %addresses,
                    "Resolved via upstream"
                );
                return Ok(Resolution::new(addresses, ResolutionSource::Upstream));
            }
            Err(e) => {
                warn!(
                    domain = %hostname,
                    error = %e,
                    "Upstream lookup failed, using system resolver"
                );
            }
        }

        self.resolve_fallback(hostname).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("DNS cache cleared");
    }

    pub fn stats_snapshot(&self) -> ResolverStatsSnapshot {
        let (total_queries, cache_hits, cache_misses) = self.stats.counters();
        ResolverStatsSnapshot {
            total_queries,
            cache_hits,
            cache_misses,
            cached_domains: self.cache.len(),
        }
    }

    pub fn get_stats(&self) -> String {
        self.stats_snapshot().to_string()
    }

    pub fn cache(&self) -> &ResolverCache {
        &self.cache
    }

    /// One-off probe of the upstream server. Bypasses the cache and the
    /// counters; true only if at least one A record comes back in time.
    pub async fn test_upstream(&self) -> bool {
        let result = self
            .query_upstream(HEALTH_CHECK_HOSTNAME, HEALTH_CHECK_TIMEOUT)
            .await;

        match result {
            Ok(addresses) => {
                info!(
                    upstream = %self.upstream.server(),
                    addresses = addresses.len(),
                    "DNS server test: SUCCESS"
                );
                true
            }
            Err(e) => {
                info!(
                    upstream = %self.upstream.server(),
                    error = %e,
                    "DNS server test: FAILED"
                );
                false
            }
        }
    }

    /// Bounded by `timeout` whatever the adapter does with it.
    async fn query_upstream(
        &self,
        hostname: &str,
        timeout: Duration,
    ) -> Result<ResolvedAddressSet, DomainError> {
        let answer = tokio::time::timeout(timeout, self.upstream.query_a(hostname, timeout))
            .await
            .map_err(|_| DomainError::UpstreamTimeout {
                server: self.upstream.server().to_string(),
            })??;

        let addresses: Vec<IpAddr> = answer.into_iter().map(IpAddr::V4).collect();
        ResolvedAddressSet::new(addresses).ok_or_else(|| DomainError::UpstreamEmptyResult {
            hostname: hostname.to_string(),
        })
    }

    async fn resolve_fallback(&self, hostname: &str) -> Result<Resolution, DomainError> {
        debug!(domain = %hostname, "Using system DNS");

        let addresses = match self.fallback.resolve(hostname).await {
            Ok(addresses) => ResolvedAddressSet::new(addresses),
            Err(e) => {
                warn!(domain = %hostname, error = %e, "System DNS also failed");
                None
            }
        };

        match addresses {
            Some(addresses) => {
                debug!(
                    domain = %hostname,
                    addresses = %addresses,
                    "Resolved via system DNS (not cached)"
                );
                Ok(Resolution::new(addresses, ResolutionSource::Fallback))
            }
            None => Err(DomainError::ResolutionFailed {
                hostname: hostname.to_string(),
            }),
        }
    }
}
