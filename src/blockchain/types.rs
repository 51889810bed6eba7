//! Chain-specific types and error definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export BlockfrostConfig from config module to avoid duplication
pub use crate::config::schema::BlockfrostConfig;

/// Asset unit Blockfrost uses for ADA.
pub const LOVELACE_UNIT: &str = "lovelace";

/// One asset entry of a UTXO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAmount {
    /// `lovelace` or policy id + hex asset name.
    pub unit: String,
    /// Decimal string, as returned by the API.
    pub quantity: String,
}

impl AssetAmount {
    /// Build a lovelace entry.
    pub fn lovelace(quantity: u64) -> Self {
        Self {
            unit: LOVELACE_UNIT.to_string(),
            quantity: quantity.to_string(),
        }
    }

    pub fn is_lovelace(&self) -> bool {
        self.unit == LOVELACE_UNIT
    }
}

/// An unspent output held by the monitored address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub tx_hash: String,
    pub output_index: u32,
    pub amount: Vec<AssetAmount>,
}

impl Utxo {
    /// Reference of this output.
    pub fn reference(&self) -> TxIn {
        TxIn {
            tx_hash: self.tx_hash.clone(),
            output_index: self.output_index,
        }
    }

    /// True if the output carries anything besides ADA.
    pub fn has_native_assets(&self) -> bool {
        self.amount.iter().any(|a| !a.is_lovelace())
    }
}

/// Transaction input reference, rendered as `<tx_hash>#<index>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxIn {
    pub tx_hash: String,
    pub output_index: u32,
}

impl fmt::Display for TxIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.tx_hash, self.output_index)
    }
}

/// Transaction output, rendered as `<address>+<lovelace>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    pub address: String,
    pub lovelace: u64,
}

impl TxOut {
    pub fn new(address: impl Into<String>, lovelace: u64) -> Self {
        Self {
            address: address.into(),
            lovelace,
        }
    }
}

impl fmt::Display for TxOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.address, self.lovelace)
    }
}

/// Subset of `GET /blocks/latest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestBlock {
    pub hash: String,
    #[serde(default)]
    pub height: Option<u64>,
    /// Absent for epoch boundary blocks.
    #[serde(default)]
    pub slot: Option<u64>,
}

/// Subset of `GET /txs/{hash}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub slot: Option<u64>,
}

/// `GET /` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub url: String,
    pub version: String,
}

/// Error body returned by Blockfrost for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// Errors that can occur during chain API operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Transport level failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out.
    #[error("API timeout after {0} seconds")]
    Timeout(u64),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected schema.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client could not be constructed.
    #[error("Blockchain API not available: {0}")]
    NotAvailable(String),
}

/// Result type for chain API operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
