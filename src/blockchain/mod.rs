//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (project id, API URL)
//!     → client.rs (Blockfrost REST calls with timeouts)
//!     → types.rs (UTXOs, blocks, transactions, errors)
//! ```
//!
//! # Security Constraints
//! - The project id is only sent as a header and never logged
//! - All API calls have configurable timeouts
//! - Signing never happens here; signed CBOR arrives from the CLI adapter

pub mod client;
pub mod types;

pub use client::{BlockfrostClient, ChainApi};
pub use types::{
    ApiInfo, AssetAmount, BlockchainError, BlockchainResult, LatestBlock, TransactionInfo, TxIn,
    TxOut, Utxo,
};
