use dnsprobe_domain::Config;
use dnsprobe_infrastructure::{ClientAssembler, ProbeClient};
use tracing::info;

/// Everything the subcommands need, wired from one [`Config`].
pub struct Services {
    pub assembler: ClientAssembler,
    pub client: ProbeClient,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let assembler = ClientAssembler::from_config(&config.client)?;
        let client = assembler.build_client(&config.client)?;

        info!(
            upstream = %assembler.resolver().upstream_server(),
            follow_redirects = config.client.follow_redirects,
            retry_on_connection_failure = config.client.retry_on_connection_failure,
            "Services initialized"
        );

        Ok(Self { assembler, client })
    }
}
