//! Reservation Board CLI
//!
//! Serves the restaurant reservation list, or prints it once with `--once`.

use std::path::PathBuf;

use clap::Parser;
use reservation_board::{load_config, render_once, run, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "reservation-board")]
#[command(about = "Restaurant reservation list")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the reservations service (overrides config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Dashboard port (overrides config file)
    #[arg(long)]
    port: Option<u16>,

    /// Fetch once, print the rendered list to stdout and exit
    #[arg(long)]
    once: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, base_url={:?}, port={:?}, once={}, log_level={:?}",
        args.config,
        args.base_url,
        args.port,
        args.once,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(base_url) = args.base_url {
        config.source.base_url = base_url;
    }
    if let Some(port) = args.port {
        config.dashboard.port = port;
    }

    if args.once {
        println!("{}", render_once(&config).await?);
        return Ok(());
    }

    tracing::info!(
        "Starting reservation board for {}",
        config.source.reservations_url()
    );
    run(config).await?;

    Ok(())
}
