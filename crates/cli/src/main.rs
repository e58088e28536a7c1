use clap::{Parser, Subcommand};
use dnsprobe_domain::CliOverrides;
use futures::future::join_all;
use std::time::Instant;
use tracing::{info, warn};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "dnsprobe")]
#[command(version)]
#[command(about = "Resolve through a chosen upstream DNS server and probe HTTP endpoints with it")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Upstream DNS server (IP or IP:port)
    #[arg(short = 'u', long, value_name = "ADDR")]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the upstream server answers A queries
    Check,

    /// Resolve hostnames through the custom resolver
    Resolve {
        #[arg(required = true, value_name = "HOST")]
        hosts: Vec<String>,
    },

    /// Issue GET requests through the assembled client
    Fetch {
        /// Fetch the URL list this many times
        #[arg(short = 'n', long, default_value_t = 1)]
        repeat: usize,

        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        upstream_server: cli.upstream.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting dnsprobe v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config)?;

    match cli.command {
        Command::Check => check(&services).await,
        Command::Resolve { hosts } => resolve(&services, &hosts).await,
        Command::Fetch { repeat, urls } => fetch(&services, repeat, &urls).await,
    }
}

async fn check(services: &di::Services) -> anyhow::Result<()> {
    let upstream = services.assembler.resolver().upstream_server();

    if services.assembler.test_resolver_health().await {
        println!("Upstream {} is answering", upstream);
        Ok(())
    } else {
        anyhow::bail!("upstream {} did not answer", upstream)
    }
}

async fn resolve(services: &di::Services, hosts: &[String]) -> anyhow::Result<()> {
    let resolver = services.assembler.resolver();
    let mut failures = 0usize;

    for host in hosts {
        match resolver.lookup(host).await {
            Ok(resolution) => {
                println!("{} [{}] {}", host, resolution.source, resolution.addresses);
            }
            Err(e) => {
                failures += 1;
                warn!(domain = %host, error = %e, "Lookup failed");
                println!("{} FAILED: {}", host, e);
            }
        }
    }

    println!();
    println!("{}", resolver.get_stats());

    if failures > 0 {
        anyhow::bail!("{} of {} lookups failed", failures, hosts.len());
    }
    Ok(())
}

async fn fetch(services: &di::Services, repeat: usize, urls: &[String]) -> anyhow::Result<()> {
    let requests = (0..repeat.max(1)).flat_map(|_| urls.iter()).map(|url| {
        let client = services.client.clone();
        async move {
            let start = Instant::now();
            let outcome = client.get(url).await;
            (url, outcome, start.elapsed())
        }
    });

    for (url, outcome, elapsed) in join_all(requests).await {
        match outcome {
            Ok(response) => println!(
                "{} {} ({} bytes, {} ms)",
                url,
                response.status(),
                response.body().len(),
                elapsed.as_millis()
            ),
            Err(e) => println!("{} FAILED: {} ({} ms)", url, e, elapsed.as_millis()),
        }
    }

    println!();
    println!("{}", services.assembler.combined_stats());
    Ok(())
}
