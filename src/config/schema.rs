//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the splitter.
//! All types derive Serde traits so tunables can come from a TOML file; the
//! addresses and credentials normally arrive through environment variables.

use serde::{Deserialize, Serialize};

/// Root configuration for the address splitter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SplitterConfig {
    /// Address polling settings.
    pub monitor: MonitorConfig,

    /// Destination addresses and split ratio.
    pub split: SplitConfig,

    /// Blockfrost API settings.
    pub blockfrost: BlockfrostConfig,

    /// External `cardano-cli` settings.
    pub cardano_cli: CardanoCliConfig,

    /// Transaction building settings.
    pub transaction: TransactionConfig,

    /// Submission confirmation polling.
    pub confirmation: ConfirmationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Monitored address and trigger threshold.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Address whose UTXOs are swept.
    pub address: String,

    /// Number of UTXOs that triggers a split (also the number consumed).
    pub utxo_count_split: usize,

    /// Seconds between poll cycles.
    pub poll_interval_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            utxo_count_split: 0,
            poll_interval_secs: 3600,
        }
    }
}

/// Split destinations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Receives `lower_percent` of the swept value.
    pub lower_address: String,

    /// Receives the remainder, minus the transaction fee.
    pub higher_address: String,

    /// Share of the total sent to the lower address, in percent.
    pub lower_percent: u8,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            lower_address: String::new(),
            higher_address: String::new(),
            lower_percent: 20,
        }
    }
}

/// Blockfrost API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockfrostConfig {
    /// Base URL including the `/api/v0/` path.
    pub api_url: String,

    /// Project id sent in the `project_id` header.
    pub project_id: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BlockfrostConfig {
    fn default() -> Self {
        Self {
            api_url: "https://cardano-preprod.blockfrost.io/api/v0/".to_string(),
            project_id: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Network flag passed to `cardano-cli transaction sign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    #[default]
    Mainnet,
    TestnetMagic(u32),
}

/// External binary configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CardanoCliConfig {
    /// Program name or path of `cardano-cli`.
    pub binary: String,

    /// Protocol parameters file used for fee calculation.
    pub protocol_params_file: String,

    /// Signing key files, in the order they are passed to `sign`.
    pub signing_keys: Vec<String>,

    /// Network the transaction is signed for.
    pub network: Network,

    /// Seconds before a running invocation is killed.
    pub timeout_secs: u64,
}

impl Default for CardanoCliConfig {
    fn default() -> Self {
        Self {
            binary: "cardano-cli".to_string(),
            protocol_params_file: "keys/protocol-params.json".to_string(),
            signing_keys: vec!["keys/payment.skey".to_string()],
            network: Network::Mainnet,
            timeout_secs: 120,
        }
    }
}

/// Transaction building configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Slots added to the latest slot for `--invalid-hereafter`.
    pub ttl_offset_slots: u64,

    /// Witness count used for fee estimation.
    pub witness_count: u32,

    /// Directory under which per-attempt working directories are created.
    pub work_root: String,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            ttl_offset_slots: 10_800,
            witness_count: 1,
            work_root: ".".to_string(),
        }
    }
}

/// Confirmation polling after submission.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Lookups before giving up.
    pub max_attempts: u32,

    /// Seconds between lookups.
    pub delay_secs: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            delay_secs: 5,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human readable or JSON lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
