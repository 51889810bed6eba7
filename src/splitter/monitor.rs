//! Address polling loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::blockchain::client::ChainApi;
use crate::cardano::TransactionTool;
use crate::config::SplitterConfig;
use crate::lifecycle::ShutdownListener;
use crate::observability::metrics;
use crate::splitter::error::SplitResult;
use crate::splitter::lifecycle::{SplitReport, SplitSettings, Splitter};
use crate::splitter::plan::select_utxos;

/// Result of one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Not enough UTXOs yet.
    BelowThreshold { found: usize, threshold: usize },
    /// A split transaction was submitted.
    Split(SplitReport),
}

/// Service that watches one address and splits its UTXOs.
pub struct AddressMonitor<A, T> {
    api: Arc<A>,
    splitter: Splitter<A, T>,
    address: String,
    threshold: usize,
    interval: Duration,
}

impl<A: ChainApi, T: TransactionTool> AddressMonitor<A, T> {
    /// Create a monitor from validated configuration.
    pub fn new(api: Arc<A>, tool: T, config: &SplitterConfig) -> Self {
        let splitter = Splitter::new(api.clone(), tool, SplitSettings::from(config));
        Self {
            api,
            splitter,
            address: config.monitor.address.clone(),
            threshold: config.monitor.utxo_count_split,
            interval: Duration::from_secs(config.monitor.poll_interval_secs),
        }
    }

    pub fn splitter(&self) -> &Splitter<A, T> {
        &self.splitter
    }

    /// Fetch the address UTXOs and split the first `threshold` of them if enough exist.
    pub async fn poll_once(&self) -> SplitResult<CycleOutcome> {
        tracing::info!(address = %self.address, "Running address check");

        let utxos = self.api.address_utxos(&self.address).await?;
        tracing::info!(utxos = utxos.len(), "Found utxos for address");
        metrics::record_address_utxos(utxos.len());

        let Some(selected) = select_utxos(&utxos, self.threshold) else {
            return Ok(CycleOutcome::BelowThreshold {
                found: utxos.len(),
                threshold: self.threshold,
            });
        };

        let report = self.splitter.split(selected).await?;
        Ok(CycleOutcome::Split(report))
    }

    /// Run the monitor loop until `shutdown` fires.
    ///
    /// Cycle errors are logged and the next cycle runs after the usual interval.
    pub async fn run(&self, mut shutdown: ShutdownListener) {
        tracing::info!(
            address = %self.address,
            threshold = self.threshold,
            interval_secs = self.interval.as_secs(),
            "Starting address monitor"
        );

        while !shutdown.is_triggered() {
            self.run_cycle().await;

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = shutdown.wait() => {
                    tracing::info!("Address monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// One logged cycle.
    pub async fn run_cycle(&self) {
        match self.poll_once().await {
            Ok(CycleOutcome::BelowThreshold { found, threshold }) => {
                tracing::debug!(found, threshold, "Not enough utxos to split");
                metrics::record_poll_cycle("idle");
            }
            Ok(CycleOutcome::Split(report)) => {
                tracing::info!(
                    tx_hash = %report.tx_hash,
                    fee = report.fee,
                    lower = report.lower_lovelace,
                    higher = report.higher_lovelace,
                    confirmed = report.confirmed,
                    "Split complete"
                );
                metrics::record_poll_cycle("split");
            }
            Err(e) => {
                tracing::error!(error = %e, "Error building tx");
                metrics::record_poll_cycle("error");
            }
        }
    }
}
