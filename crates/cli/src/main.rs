use clap::Parser;
use dnsrelay_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "dnsrelay")]
#[command(version)]
#[command(about = "Caching DNS relay with static overrides")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Upstream resolver address
    #[arg(short = 'r', long)]
    remote: Option<String>,

    /// Maximum number of cached answers (0 disables caching)
    #[arg(long)]
    cache_size: Option<usize>,

    /// Static override file
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Seconds between statistics lines (0 disables)
    #[arg(short = 's', long)]
    stat_interval: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        bind_address: cli.bind,
        port: cli.port,
        upstream_address: cli.remote,
        cache_capacity: cli.cache_size,
        static_file: cli.file,
        log_level: cli.log_level,
        stat_interval: cli.stat_interval,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting dnsrelay v{}", env!("CARGO_PKG_VERSION"));

    let table = bootstrap::load_answer_table(&config);
    let dispatcher = server::build_dispatcher(&config, table)?;

    server::start_stats_reporter(dispatcher.metrics(), config.logging.stat_interval);

    tokio::select! {
        _ = server::run_relay(dispatcher) => {
            error!("Relay loop exited");
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
        }
    }

    info!("Relay shutdown complete");
    Ok(())
}
