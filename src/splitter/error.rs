//! Split attempt errors.

use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::cardano::{CliError, EnvelopeError};
use crate::splitter::plan::PlanError;

/// Anything that aborts a poll cycle or split attempt.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Chain API error: {0}")]
    Chain(#[from] BlockchainError),

    #[error("cardano-cli error: {0}")]
    Cli(#[from] CliError),

    #[error("Signed transaction error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("Error creating working directory: {0}")]
    WorkDir(#[source] std::io::Error),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Latest block {0} has no slot")]
    MissingSlot(String),
}

/// Result type for split operations.
pub type SplitResult<T> = Result<T, SplitError>;
