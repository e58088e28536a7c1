use std::fmt;

/// Integer percentage, truncated; 0 when `total` is 0.
fn percentage(part: u64, total: u64) -> u64 {
    if total == 0 {
        0
    } else {
        part * 100 / total
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStatsSnapshot {
    pub total_queries: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cached_domains: usize,
}

impl ResolverStatsSnapshot {
    pub fn hit_rate(&self) -> u64 {
        percentage(self.cache_hits, self.total_queries)
    }
}

// Field labels are parsed line by line by UI callers; keep them literal.
impl fmt::Display for ResolverStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DNS Statistics:")?;
        writeln!(f, "Total Queries: {}", self.total_queries)?;
        writeln!(f, "Cache Hits: {}", self.cache_hits)?;
        writeln!(f, "Cache Misses: {}", self.cache_misses)?;
        writeln!(f, "Hit Rate: {}%", self.hit_rate())?;
        write!(f, "Cached Domains: {}", self.cached_domains)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterceptorStatsSnapshot {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
}

impl InterceptorStatsSnapshot {
    pub fn success_rate(&self) -> u64 {
        percentage(self.successful_requests, self.total_requests)
    }
}

impl fmt::Display for InterceptorStatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network Statistics:")?;
        writeln!(f, "Total Requests: {}", self.total_requests)?;
        writeln!(f, "Successful: {}", self.successful_requests)?;
        writeln!(f, "Failed: {}", self.failed_requests)?;
        write!(f, "Success Rate: {}%", self.success_rate())
    }
}
