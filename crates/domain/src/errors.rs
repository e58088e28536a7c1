use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Upstream server {server} timed out")]
    UpstreamTimeout { server: String },

    #[error("Upstream server {server} unreachable: {reason}")]
    UpstreamUnreachable { server: String, reason: String },

    #[error("Upstream returned no A records for {hostname}")]
    UpstreamEmptyResult { hostname: String },

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Invalid hostname: {0}")]
    InvalidHostname(String),

    /// Both the upstream server and the system resolver failed.
    #[error("Unable to resolve {hostname}")]
    ResolutionFailed { hostname: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

/// Failure of a single physical HTTP attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection to {host} failed: {reason}")]
    Connect { host: String, reason: String },

    /// Name resolution failed before any connection was attempted.
    #[error("Resolution failed: {0}")]
    Resolution(DomainError),

    #[error("Request to {host} timed out")]
    Timeout { host: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Too many redirects (limit {0})")]
    TooManyRedirects(usize),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Connect-phase failures are the only ones worth retrying.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }
}
