//! External-process adapter for `cardano-cli`.
//!
//! # Data Flow
//! ```text
//! splitter (typed parameters)
//!     → cli.rs (argument assembly, TransactionTool)
//!     → runner.rs (spawn, timeout, stdout lines)
//!     → fee.rs (calculate-min-fee output contract)
//!
//! signed file
//!     → envelope.rs (cborHex → raw bytes)
//! ```

pub mod cli;
pub mod envelope;
pub mod error;
pub mod fee;
pub mod runner;

pub use cli::{CardanoCli, FeeEstimate, RawTransaction, TransactionTool};
pub use envelope::EnvelopeError;
pub use error::{CliError, CliResult};
pub use runner::{CommandRunner, ProcessRunner};
