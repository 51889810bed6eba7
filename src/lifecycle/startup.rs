//! Startup orchestration.
//!
//! # Responsibilities
//! - Install the metrics exporter when enabled
//! - Build the chain client and verify it against the API root
//! - Assemble the address monitor
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and returned to `main`
//! - Missing key or parameter files only warn; they may be mounted later

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::blockchain::{BlockchainError, BlockfrostClient, ChainApi};
use crate::cardano::CardanoCli;
use crate::config::{ConfigError, SplitterConfig};
use crate::observability::metrics;
use crate::splitter::AddressMonitor;

/// Errors that stop the service before the first poll cycle.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Error getting api info: {0}")]
    Chain(#[from] BlockchainError),

    #[error("Metrics exporter error: {0}")]
    Metrics(String),
}

/// The production monitor type.
pub type SplitterService = AddressMonitor<BlockfrostClient, CardanoCli>;

/// Initialize every subsystem in dependency order.
pub async fn start(config: &SplitterConfig) -> Result<SplitterService, StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|e| StartupError::Metrics(format!("Invalid metrics address: {}", e)))?;
        metrics::init_metrics(addr).map_err(|e| StartupError::Metrics(e.to_string()))?;
    }

    let api = BlockfrostClient::new(&config.blockfrost)?;
    let info = api.info().await?;
    tracing::info!(url = %info.url, version = %info.version, "API info");

    warn_if_missing("protocol parameters", &config.cardano_cli.protocol_params_file);
    for key in &config.cardano_cli.signing_keys {
        warn_if_missing("signing key", key);
    }

    let tool = CardanoCli::new(config.cardano_cli.clone());
    Ok(AddressMonitor::new(Arc::new(api), tool, config))
}

fn warn_if_missing(kind: &str, path: &str) {
    if !Path::new(path).exists() {
        tracing::warn!(kind, path, "File not found; split attempts will fail until it exists");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StartupError::Chain(BlockchainError::Api {
            status: 403,
            message: "Invalid project token.".into(),
        });
        assert_eq!(
            err.to_string(),
            "Error getting api info: API error 403: Invalid project token."
        );
    }

    #[tokio::test]
    async fn test_unreachable_api_is_fatal() {
        let mut config = SplitterConfig::default();
        config.blockfrost.api_url = "http://127.0.0.1:1/api/v0/".into();
        config.blockfrost.project_id = "preprodtest".into();
        config.blockfrost.timeout_secs = 2;

        let result = start(&config).await;
        assert!(matches!(result, Err(StartupError::Chain(_))));
    }

    #[tokio::test]
    async fn test_invalid_metrics_address() {
        let mut config = SplitterConfig::default();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "not-an-address".into();

        let result = start(&config).await;
        assert!(matches!(result, Err(StartupError::Metrics(_))));
    }
}
