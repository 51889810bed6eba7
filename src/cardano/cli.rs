//! `cardano-cli` transaction commands.
//!
//! # Responsibilities
//! - Assemble the exact argument lists for build-raw, calculate-min-fee, sign
//! - Invoke the binary through a `CommandRunner`
//! - Parse the fee from calculate-min-fee output
//!
//! The orchestrator only sees the `TransactionTool` trait, so another
//! transaction builder can be dropped in without touching it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::blockchain::types::{TxIn, TxOut};
use crate::cardano::error::CliResult;
use crate::cardano::fee::parse_min_fee;
use crate::cardano::runner::{CommandRunner, ProcessRunner};
use crate::config::{CardanoCliConfig, Network};
use crate::observability::metrics;

/// Parameters of a raw (unbalanced) transaction body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub tx_ins: Vec<TxIn>,
    pub tx_outs: Vec<TxOut>,
    /// Slot after which the transaction is invalid; zero for drafts.
    pub invalid_hereafter: u64,
    pub fee: u64,
    pub out_file: PathBuf,
}

/// Inputs of a minimum fee estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeEstimate {
    pub tx_body_file: PathBuf,
    pub tx_in_count: usize,
    pub tx_out_count: usize,
    pub witness_count: u32,
}

/// Transaction building, fee estimation and signing.
#[async_trait]
pub trait TransactionTool: Send + Sync {
    /// Write a transaction body to `tx.out_file`.
    async fn build_raw(&self, tx: &RawTransaction) -> CliResult<()>;

    /// Minimum fee in lovelace for the body described by `estimate`.
    async fn calculate_min_fee(&self, estimate: &FeeEstimate) -> CliResult<u64>;

    /// Sign `tx_body_file` with the configured keys into `out_file`.
    async fn sign(&self, tx_body_file: &Path, out_file: &Path) -> CliResult<()>;
}

/// `TransactionTool` backed by the `cardano-cli` binary.
#[derive(Debug, Clone)]
pub struct CardanoCli<R = ProcessRunner> {
    runner: R,
    config: CardanoCliConfig,
}

impl CardanoCli<ProcessRunner> {
    /// Create an adapter that spawns real processes.
    pub fn new(config: CardanoCliConfig) -> Self {
        let runner = ProcessRunner::new(Duration::from_secs(config.timeout_secs));
        Self::with_runner(config, runner)
    }
}

impl<R: CommandRunner> CardanoCli<R> {
    pub fn with_runner(config: CardanoCliConfig, runner: R) -> Self {
        Self { runner, config }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Arguments of `transaction build-raw`.
    pub fn build_raw_args(&self, tx: &RawTransaction) -> Vec<String> {
        let mut args = vec!["transaction".to_string(), "build-raw".to_string()];
        for tx_in in &tx.tx_ins {
            args.push("--tx-in".to_string());
            args.push(tx_in.to_string());
        }
        for tx_out in &tx.tx_outs {
            args.push("--tx-out".to_string());
            args.push(tx_out.to_string());
        }
        args.push("--invalid-hereafter".to_string());
        args.push(tx.invalid_hereafter.to_string());
        args.push("--fee".to_string());
        args.push(tx.fee.to_string());
        args.push("--out-file".to_string());
        args.push(path_arg(&tx.out_file));
        args
    }

    /// Arguments of `transaction calculate-min-fee`.
    pub fn min_fee_args(&self, estimate: &FeeEstimate) -> Vec<String> {
        vec![
            "transaction".to_string(),
            "calculate-min-fee".to_string(),
            "--tx-body-file".to_string(),
            path_arg(&estimate.tx_body_file),
            "--tx-in-count".to_string(),
            estimate.tx_in_count.to_string(),
            "--tx-out-count".to_string(),
            estimate.tx_out_count.to_string(),
            "--witness-count".to_string(),
            estimate.witness_count.to_string(),
            "--byron-witness-count".to_string(),
            "0".to_string(),
            "--protocol-params-file".to_string(),
            self.config.protocol_params_file.clone(),
        ]
    }

    /// Arguments of `transaction sign`.
    pub fn sign_args(&self, tx_body_file: &Path, out_file: &Path) -> Vec<String> {
        let mut args = vec![
            "transaction".to_string(),
            "sign".to_string(),
            "--tx-body-file".to_string(),
            path_arg(tx_body_file),
        ];
        for key in self.config.signing_keys.iter().filter(|k| !k.is_empty()) {
            args.push("--signing-key-file".to_string());
            args.push(key.clone());
        }
        args.push("--out-file".to_string());
        args.push(path_arg(out_file));
        match self.config.network {
            Network::Mainnet => args.push("--mainnet".to_string()),
            Network::TestnetMagic(magic) => {
                args.push("--testnet-magic".to_string());
                args.push(magic.to_string());
            }
        }
        args
    }

    async fn invoke(&self, operation: &'static str, args: &[String]) -> CliResult<Vec<String>> {
        let result = self.runner.run(&self.config.binary, args).await;
        metrics::record_cli_invocation(operation, result.is_ok());
        result
    }
}

#[async_trait]
impl<R: CommandRunner> TransactionTool for CardanoCli<R> {
    async fn build_raw(&self, tx: &RawTransaction) -> CliResult<()> {
        tracing::info!(
            inputs = tx.tx_ins.len(),
            outputs = tx.tx_outs.len(),
            fee = tx.fee,
            out_file = %tx.out_file.display(),
            "Building raw transaction"
        );
        self.invoke("build-raw", &self.build_raw_args(tx)).await?;
        Ok(())
    }

    async fn calculate_min_fee(&self, estimate: &FeeEstimate) -> CliResult<u64> {
        tracing::info!(tx_body_file = %estimate.tx_body_file.display(), "Calculating minimum fee");
        let output = self.invoke("calculate-min-fee", &self.min_fee_args(estimate)).await?;
        parse_min_fee(&output)
    }

    async fn sign(&self, tx_body_file: &Path, out_file: &Path) -> CliResult<()> {
        tracing::info!(tx_body_file = %tx_body_file.display(), "Signing transaction");
        self.invoke("sign", &self.sign_args(tx_body_file, out_file)).await?;
        Ok(())
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
