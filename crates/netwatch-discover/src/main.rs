//! CLI entry point for the netwatch device inventory monitor.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use netwatch_discover::config::AppConfig;
use netwatch_discover::context::AppContext;
use netwatch_discover::engine::Reconciler;
use netwatch_discover::scheduler::Scheduler;

#[derive(Parser)]
#[command(name = "netwatch")]
#[command(about = "Watch the local network and alert on newly joined devices")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Run a single scan cycle and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();

    // Configuration problems are fatal: never run with partial settings.
    let config = AppConfig::load(&cli.config)?;
    tracing::info!(
        config = %cli.config,
        interface = %config.interface,
        tailscale = config.enable_tailscale,
        cache_file = %config.cache_file,
        "Config loaded"
    );

    let interval = config.scan_interval();
    let ctx = AppContext::from_config(config)?;
    let mut reconciler = Reconciler::new(ctx);

    if cli.once {
        let report = reconciler.run_cycle().await;
        tracing::info!(report = ?report, "Single cycle finished");
    } else {
        tracing::info!("Starting netwatch");
        Scheduler::new(reconciler, interval).run().await;
    }

    Ok(())
}
