//! Parser for `transaction calculate-min-fee` output.
//!
//! The first output line must be `<unsigned integer> Lovelace`. Anything else
//! is rejected instead of guessed at.

use crate::cardano::error::{CliError, CliResult};

const FEE_UNIT: &str = "Lovelace";

/// Extract the fee in lovelace from the command's output lines.
pub fn parse_min_fee(lines: &[String]) -> CliResult<u64> {
    let unexpected = |output: &str| CliError::UnexpectedOutput {
        operation: "calculate-min-fee",
        output: output.to_string(),
    };

    let first = lines.first().map(String::as_str).unwrap_or_default();
    let mut tokens = first.split_whitespace();

    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(amount), Some(FEE_UNIT), None) => amount.parse::<u64>().map_err(|_| unexpected(first)),
        _ => Err(unexpected(first)),
    }
}
