use dashmap::DashMap;
use dnsprobe_domain::ResolvedAddressSet;

/// Hostname → addresses answered by the upstream server.
///
/// No TTL and no eviction: entries live until `clear`. Keys are matched by
/// exact string equality, so `Example.com` and `example.com.` are distinct.
/// Every stored set is non-empty by construction of `ResolvedAddressSet`.
#[derive(Default)]
pub struct ResolverCache {
    entries: DashMap<String, ResolvedAddressSet>,
}

impl ResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hostname: &str) -> Option<ResolvedAddressSet> {
        self.entries.get(hostname).map(|entry| entry.value().clone())
    }

    /// Replaces any previous set for `hostname`; last write wins.
    pub fn insert(&self, hostname: &str, addresses: ResolvedAddressSet) {
        self.entries.insert(hostname.to_string(), addresses);
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.entries.contains_key(hostname)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
