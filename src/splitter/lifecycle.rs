//! Transaction lifecycle of a single split attempt.
//!
//! ```text
//! draft (fee 0, ttl 0) → min fee → outputs - fee → latest slot
//!     → split.tx (ttl = slot + offset) → sign → cborHex → submit → confirm
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use tracing::Instrument;

use crate::blockchain::client::ChainApi;
use crate::blockchain::types::{TransactionInfo, Utxo};
use crate::cardano::envelope::{read_signed_cbor, write_raw_file};
use crate::cardano::{FeeEstimate, RawTransaction, TransactionTool};
use crate::config::SplitterConfig;
use crate::observability::metrics;
use crate::resilience::RetryPolicy;
use crate::splitter::error::{SplitError, SplitResult};
use crate::splitter::plan::SplitPlan;
use crate::splitter::workdir::WorkDir;

const DRAFT_FILE: &str = "tx.draft";
const TX_FILE: &str = "split.tx";
const SIGNED_FILE: &str = "split.signed";

/// Settings that shape a split transaction.
#[derive(Debug, Clone)]
pub struct SplitSettings {
    pub lower_address: String,
    pub higher_address: String,
    pub lower_percent: u8,
    pub ttl_offset_slots: u64,
    pub witness_count: u32,
    pub work_root: PathBuf,
    pub confirmation: RetryPolicy,
}

impl From<&SplitterConfig> for SplitSettings {
    fn from(config: &SplitterConfig) -> Self {
        Self {
            lower_address: config.split.lower_address.clone(),
            higher_address: config.split.higher_address.clone(),
            lower_percent: config.split.lower_percent,
            ttl_offset_slots: config.transaction.ttl_offset_slots,
            witness_count: config.transaction.witness_count,
            work_root: PathBuf::from(&config.transaction.work_root),
            confirmation: RetryPolicy::from(&config.confirmation),
        }
    }
}

/// What a completed split attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub tx_hash: String,
    pub inputs: usize,
    pub total: u64,
    pub fee: u64,
    pub lower_lovelace: u64,
    pub higher_lovelace: u64,
    pub invalid_hereafter: u64,
    /// Whether the transaction showed up before retries ran out.
    pub confirmed: bool,
}

/// Drives the transaction lifecycle for a set of UTXOs.
pub struct Splitter<A, T> {
    api: Arc<A>,
    tool: T,
    settings: SplitSettings,
}

impl<A: ChainApi, T: TransactionTool> Splitter<A, T> {
    pub fn new(api: Arc<A>, tool: T, settings: SplitSettings) -> Self {
        Self {
            api,
            tool,
            settings,
        }
    }

    pub fn settings(&self) -> &SplitSettings {
        &self.settings
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Sweep `utxos` into the two split outputs.
    ///
    /// The working directory is removed whether or not the attempt succeeds.
    pub async fn split(&self, utxos: &[Utxo]) -> SplitResult<SplitReport> {
        let result = self.attempt(utxos).await;
        metrics::record_split_attempt(result.is_ok());
        result
    }

    async fn attempt(&self, utxos: &[Utxo]) -> SplitResult<SplitReport> {
        let plan = SplitPlan::new(
            utxos,
            &self.settings.lower_address,
            &self.settings.higher_address,
            self.settings.lower_percent,
        )?;

        let work_dir = WorkDir::create(&self.settings.work_root)
            .await
            .map_err(SplitError::WorkDir)?;

        let span = tracing::info_span!("split", work_dir = %work_dir.path().display());
        span.in_scope(|| {
            tracing::info!(
                inputs = plan.tx_ins.len(),
                total = plan.total,
                lower = plan.lower.lovelace,
                higher = plan.higher.lovelace,
                "Splitting UTXOs"
            )
        });

        let result = self.execute(&plan, &work_dir).instrument(span).await;

        if let Err(e) = work_dir.remove().await {
            tracing::error!(error = %e, "Error removing directory");
        }

        result
    }

    async fn execute(&self, plan: &SplitPlan, work_dir: &WorkDir) -> SplitResult<SplitReport> {
        // Draft with zero fee and ttl, only used to size the transaction.
        let draft = RawTransaction {
            tx_ins: plan.tx_ins.clone(),
            tx_outs: plan.outputs(),
            invalid_hereafter: 0,
            fee: 0,
            out_file: work_dir.file(DRAFT_FILE),
        };
        self.tool.build_raw(&draft).await?;

        let fee = self
            .tool
            .calculate_min_fee(&FeeEstimate {
                tx_body_file: draft.out_file.clone(),
                tx_in_count: draft.tx_ins.len(),
                tx_out_count: draft.tx_outs.len(),
                witness_count: self.settings.witness_count,
            })
            .await?;
        tracing::info!(fee, "Calculated fee");
        metrics::record_fee(fee);

        // TODO: decide whether the lower output should carry part of the fee.
        let tx_outs = plan.outputs_with_fee(fee)?;

        let block = self.api.latest_block().await?;
        let slot = block.slot.ok_or_else(|| SplitError::MissingSlot(block.hash.clone()))?;
        let invalid_hereafter = slot + self.settings.ttl_offset_slots;
        tracing::info!(slot, invalid_hereafter, "Found latest slot");

        let tx = RawTransaction {
            tx_ins: plan.tx_ins.clone(),
            tx_outs,
            invalid_hereafter,
            fee,
            out_file: work_dir.file(TX_FILE),
        };
        self.tool.build_raw(&tx).await?;

        let signed_file = work_dir.file(SIGNED_FILE);
        self.tool.sign(&tx.out_file, &signed_file).await?;

        let cbor = read_signed_cbor(&signed_file).await?;
        write_raw_file(&signed_file, &cbor).await?;

        tracing::info!(bytes = cbor.len(), "Submitting transaction");
        let tx_hash = self.api.submit_transaction(cbor).await?;
        tracing::info!(tx_hash = %tx_hash, "Submitted transaction");

        let confirmed = if tx_hash.is_empty() {
            tracing::warn!("Submission returned an empty hash, skipping confirmation");
            false
        } else {
            self.await_confirmation(&tx_hash).await
        };

        Ok(SplitReport {
            tx_hash,
            inputs: tx.tx_ins.len(),
            total: plan.total,
            fee,
            lower_lovelace: tx.tx_outs[0].lovelace,
            higher_lovelace: tx.tx_outs[1].lovelace,
            invalid_hereafter,
            confirmed,
        })
    }

    async fn await_confirmation(&self, tx_hash: &str) -> bool {
        let api = &self.api;
        let found = self
            .settings
            .confirmation
            .poll_until(
                "confirm_transaction",
                |_| api.transaction(tx_hash),
                |info: &Option<TransactionInfo>| info.as_ref().is_some_and(|t| !t.hash.is_empty()),
            )
            .await;

        match found {
            Some(_) => {
                tracing::info!(tx_hash, "Transaction found on chain");
                true
            }
            None => false,
        }
    }
}
