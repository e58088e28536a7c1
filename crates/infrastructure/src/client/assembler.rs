use super::probe_client::ProbeClient;
use super::transport::ReqwestTransport;
use crate::dns::UdpUpstreamLookup;
use crate::system::TokioSystemResolver;
use dnsprobe_application::use_cases::interceptor::RequestInterceptor;
use dnsprobe_application::use_cases::resolver::CustomResolver;
use dnsprobe_domain::{ClientConfig, DomainError};
use std::sync::Arc;
use tracing::info;

/// Wires the custom resolver and the interceptor into HTTP clients.
///
/// Every client built by one assembler shares the same resolver cache and
/// the same counters.
pub struct ClientAssembler {
    resolver: Arc<CustomResolver>,
    interceptor: Arc<RequestInterceptor>,
}

impl ClientAssembler {
    pub fn new(resolver: Arc<CustomResolver>, interceptor: Arc<RequestInterceptor>) -> Self {
        Self {
            resolver,
            interceptor,
        }
    }

    /// Production wiring: UDP upstream lookups plus the platform resolver.
    pub fn from_config(config: &ClientConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let upstream = config.upstream_addr()?;

        let resolver = CustomResolver::new(
            Arc::new(UdpUpstreamLookup::new(upstream)),
            Arc::new(TokioSystemResolver::new()),
        );

        info!(upstream = %upstream, "Client assembler ready");
        Ok(Self::new(Arc::new(resolver), Arc::new(RequestInterceptor::new())))
    }

    /// Builds a client honouring `config`'s timeouts and flags.
    ///
    /// The upstream in `config` must be the one the resolver queries.
    pub fn build_client(&self, config: &ClientConfig) -> Result<ProbeClient, DomainError> {
        config.validate()?;

        let requested = config.upstream_addr()?;
        let wired = self.resolver.upstream_server();
        if requested != wired {
            return Err(DomainError::ConfigError(format!(
                "client wants upstream {} but the resolver queries {}",
                requested, wired
            )));
        }

        let transport = ReqwestTransport::new(config, Arc::clone(&self.resolver))?;
        Ok(ProbeClient::new(
            Arc::new(transport),
            Arc::clone(&self.interceptor),
            config,
        ))
    }

    pub async fn test_resolver_health(&self) -> bool {
        self.resolver.test_upstream().await
    }

    /// Resolver block, blank line, interceptor block.
    pub fn combined_stats(&self) -> String {
        format!(
            "{}\n\n{}",
            self.resolver.get_stats(),
            self.interceptor.get_stats()
        )
    }

    pub fn clear_resolver_cache(&self) {
        self.resolver.clear_cache();
    }

    pub fn resolver(&self) -> &Arc<CustomResolver> {
        &self.resolver
    }

    pub fn interceptor(&self) -> &Arc<RequestInterceptor> {
        &self.interceptor
    }
}
