//! Cardano address splitter.
//!
//! Polls a monitored address and, once enough UTXOs have accumulated, sweeps
//! them into two outputs split 20/80 between a pair of destination addresses.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────── SPLITTER ───────────────────────────────┐
//!   │                                                                          │
//!   │  ┌──────────┐  every interval  ┌──────────────┐   UTXOs   ┌───────────┐  │
//!   │  │ monitor  │─────────────────▶│  blockchain  │◀─────────▶│ Blockfrost│──┼─▶ HTTP
//!   │  └────┬─────┘                  │    client    │  submit   └───────────┘  │
//!   │       │ ≥ threshold            └──────────────┘                          │
//!   │       ▼                                                                  │
//!   │  ┌──────────┐  draft/fee/sign  ┌──────────────┐                          │
//!   │  │lifecycle │─────────────────▶│   cardano    │──────────────────────────┼─▶ cardano-cli
//!   │  │ + workdir│                  │   adapter    │                          │
//!   │  └──────────┘                  └──────────────┘                          │
//!   │                                                                          │
//!   │  config · observability · resilience (retry policy) · lifecycle          │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use cardano_address_splitter::config::{load_config, ObservabilityConfig};
use cardano_address_splitter::lifecycle::{self, signals::shutdown_signal, Shutdown};
use cardano_address_splitter::observability::logging;

#[derive(Parser)]
#[command(name = "cardano-address-splitter")]
#[command(about = "Sweeps UTXOs of a Cardano address into a 20/80 split", long_about = None)]
struct Cli {
    /// Optional TOML file with tunables; addresses still come from the environment.
    #[arg(short, long, env = "SPLITTER_CONFIG")]
    config: Option<PathBuf>,

    /// Run a single poll cycle and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());
    let observability = config
        .as_ref()
        .map(|c| c.observability.clone())
        .unwrap_or_else(|_| ObservabilityConfig::default());
    logging::init(&observability);

    tracing::info!("Starting Cardano Address Splitter...");

    let config = config.inspect_err(|e| tracing::error!(error = %e, "Invalid configuration"))?;

    tracing::info!(
        address = %config.monitor.address,
        threshold = config.monitor.utxo_count_split,
        interval_secs = config.monitor.poll_interval_secs,
        api_url = %config.blockfrost.api_url,
        "Configuration loaded"
    );

    let monitor = lifecycle::start(&config)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Startup failed"))?;

    if cli.once {
        monitor.run_cycle().await;
        return Ok(());
    }

    let shutdown = Shutdown::new();
    let listener = shutdown.listener();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    monitor.run(listener).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
