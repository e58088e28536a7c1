use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::errors::ConfigError;

const DEFAULT_DNS_PORT: u16 = 53;

/// Settings for one assembled HTTP client. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Name server queried directly for A records, `IP` or `IP:port`.
    #[serde(default = "default_upstream_server")]
    pub upstream_server: String,

    #[serde(default = "default_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_timeout_ms")]
    pub read_timeout_ms: u64,

    #[serde(default = "default_timeout_ms")]
    pub write_timeout_ms: u64,

    #[serde(default = "default_true")]
    pub follow_redirects: bool,

    #[serde(default = "default_true")]
    pub retry_on_connection_failure: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            upstream_server: default_upstream_server(),
            connect_timeout_ms: default_timeout_ms(),
            read_timeout_ms: default_timeout_ms(),
            write_timeout_ms: default_timeout_ms(),
            follow_redirects: true,
            retry_on_connection_failure: true,
        }
    }
}

impl ClientConfig {
    pub fn with_upstream(upstream_server: impl Into<String>) -> Self {
        Self {
            upstream_server: upstream_server.into(),
            ..Self::default()
        }
    }

    pub fn upstream_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_upstream_addr(&self.upstream_server)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.upstream_addr()?;

        for (name, value) in [
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("read_timeout_ms", self.read_timeout_ms),
            ("write_timeout_ms", self.write_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{} cannot be 0", name)));
            }
        }

        Ok(())
    }
}

/// Parses `IP`, `IP:port` or `[IPv6]:port`; the port defaults to 53.
///
/// Hostnames are rejected: the upstream is the server under test and must not
/// itself depend on name resolution.
pub fn parse_upstream_addr(s: &str) -> Result<SocketAddr, ConfigError> {
    let s = s.trim();

    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let bare = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s);
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT));
    }

    Err(ConfigError::Validation(format!(
        "Invalid upstream server address '{}': expected IP or IP:port",
        s
    )))
}

fn default_upstream_server() -> String {
    "156.154.70.1".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_true() -> bool {
    true
}
