pub mod client;
pub mod errors;
pub mod logging;
pub mod root;

pub use client::{parse_upstream_addr, ClientConfig};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
