//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required addresses and credentials are present
//! - Validate value ranges (threshold > 0, percent within 1..=99)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SplitterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::SplitterConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required value was not provided.
    #[error("{field} is required (set {env_var})")]
    Missing {
        field: &'static str,
        env_var: &'static str,
    },

    /// An environment variable could not be parsed.
    #[error("{env_var}={value:?} is not a valid {expected}")]
    InvalidEnv {
        env_var: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A value is outside its permitted range.
    #[error("{field} {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },

    /// The API base URL does not parse.
    #[error("blockfrost.api_url {url:?} is invalid: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Check a fully merged configuration.
pub fn validate_config(config: &SplitterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.monitor.address.trim().is_empty() {
        errors.push(ValidationError::Missing {
            field: "monitor.address",
            env_var: "MONITOR_ADDRESS",
        });
    }
    if config.split.lower_address.trim().is_empty() {
        errors.push(ValidationError::Missing {
            field: "split.lower_address",
            env_var: "SPLIT_LOWER_ADDRESS",
        });
    }
    if config.split.higher_address.trim().is_empty() {
        errors.push(ValidationError::Missing {
            field: "split.higher_address",
            env_var: "SPLIT_HIGHER_ADDRESS",
        });
    }
    if config.blockfrost.project_id.trim().is_empty() {
        errors.push(ValidationError::Missing {
            field: "blockfrost.project_id",
            env_var: "BLOCKFROST_PROJECT_ID",
        });
    }

    if config.monitor.utxo_count_split == 0 {
        errors.push(ValidationError::OutOfRange {
            field: "monitor.utxo_count_split",
            reason: "must be greater than zero (set UTXO_COUNT_SPLIT)",
        });
    }
    if config.monitor.poll_interval_secs == 0 {
        errors.push(ValidationError::OutOfRange {
            field: "monitor.poll_interval_secs",
            reason: "must be greater than zero",
        });
    }
    if !(1..=99).contains(&config.split.lower_percent) {
        errors.push(ValidationError::OutOfRange {
            field: "split.lower_percent",
            reason: "must be between 1 and 99",
        });
    }
    if config.confirmation.max_attempts == 0 {
        errors.push(ValidationError::OutOfRange {
            field: "confirmation.max_attempts",
            reason: "must be greater than zero",
        });
    }
    if config.cardano_cli.signing_keys.is_empty() {
        errors.push(ValidationError::OutOfRange {
            field: "cardano_cli.signing_keys",
            reason: "must list at least one key file",
        });
    }

    if let Err(e) = url::Url::parse(&config.blockfrost.api_url) {
        errors.push(ValidationError::InvalidUrl {
            url: config.blockfrost.api_url.clone(),
            reason: e.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
