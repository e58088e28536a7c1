mod cache;
mod custom_resolver;
mod stats;

pub use cache::ResolverCache;
pub use custom_resolver::{
    CustomResolver, HEALTH_CHECK_HOSTNAME, HEALTH_CHECK_TIMEOUT, UPSTREAM_LOOKUP_TIMEOUT,
};
pub use stats::ResolverStats;
