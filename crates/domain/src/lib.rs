//! dnsprobe domain layer
pub mod config;
pub mod errors;
pub mod resolution;
pub mod stats;

pub use config::{CliOverrides, ClientConfig, Config, ConfigError, LoggingConfig};
pub use errors::{DomainError, TransportError};
pub use resolution::{Resolution, ResolutionSource, ResolvedAddressSet};
pub use stats::{InterceptorStatsSnapshot, ResolverStatsSnapshot};
