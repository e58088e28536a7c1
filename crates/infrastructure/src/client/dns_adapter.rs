use dnsprobe_application::use_cases::resolver::CustomResolver;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// Routes every hostname reqwest connects to through [`CustomResolver`].
#[derive(Clone)]
pub struct ResolverDns {
    resolver: Arc<CustomResolver>,
}

impl ResolverDns {
    pub fn new(resolver: Arc<CustomResolver>) -> Self {
        Self { resolver }
    }
}

impl Resolve for ResolverDns {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = Arc::clone(&self.resolver);
        let host = name.as_str().to_string();

        Box::pin(async move {
            let resolution = resolver
                .lookup(&host)
                .await
                .map_err(|e| Box::new(e) as Box<dyn Error + Send + Sync>)?;

            debug!(
                domain = %host,
                source = %resolution.source,
                addresses = resolution.addresses.len(),
                "Resolved for connect"
            );

            // Port 0 is replaced by the connector with the URL's port.
            let addrs: Vec<SocketAddr> = resolution
                .addresses
                .iter()
                .map(|ip| SocketAddr::new(*ip, 0))
                .collect();

            Ok::<Addrs, Box<dyn Error + Send + Sync>>(Box::new(addrs.into_iter()))
        })
    }
}
