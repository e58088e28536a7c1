use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// Ordered, non-empty list of addresses resolved for one hostname.
///
/// Cheap to clone: the addresses live behind an `Arc`, so a cache hit hands
/// out the same allocation that was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddressSet {
    addresses: Arc<Vec<IpAddr>>,
}

impl ResolvedAddressSet {
    /// Returns `None` for an empty list; an empty answer is never a result.
    pub fn new(addresses: Vec<IpAddr>) -> Option<Self> {
        if addresses.is_empty() {
            return None;
        }
        Some(Self {
            addresses: Arc::new(addresses),
        })
    }

    pub fn addresses(&self) -> &[IpAddr] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IpAddr> {
        self.addresses.iter()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.addresses, &other.addresses)
    }
}

impl fmt::Display for ResolvedAddressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for addr in self.addresses.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}", addr)?;
            first = false;
        }
        Ok(())
    }
}

/// Where a successful lookup got its answer from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionSource {
    Cache,
    Upstream,
    Fallback,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Upstream => "upstream",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub addresses: ResolvedAddressSet,
    pub source: ResolutionSource,
}

impl Resolution {
    pub fn new(addresses: ResolvedAddressSet, source: ResolutionSource) -> Self {
        Self { addresses, source }
    }

    pub fn cache_hit(&self) -> bool {
        self.source == ResolutionSource::Cache
    }
}
