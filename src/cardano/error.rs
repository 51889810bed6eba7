//! External process errors.

use thiserror::Error;

/// Errors raised while running or interpreting `cardano-cli`.
#[derive(Debug, Error)]
pub enum CliError {
    /// The binary could not be started.
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The binary exited unsuccessfully.
    #[error("{program} failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The binary did not finish in time and was killed.
    #[error("{program} timed out after {secs} seconds")]
    Timeout { program: String, secs: u64 },

    /// Output did not match the expected shape.
    #[error("Unexpected {operation} output: {output:?}")]
    UnexpectedOutput {
        operation: &'static str,
        output: String,
    },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
