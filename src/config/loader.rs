//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::SplitterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables read on top of the file configuration.
pub const ENV_MONITOR_ADDRESS: &str = "MONITOR_ADDRESS";
pub const ENV_SPLIT_LOWER_ADDRESS: &str = "SPLIT_LOWER_ADDRESS";
pub const ENV_SPLIT_HIGHER_ADDRESS: &str = "SPLIT_HIGHER_ADDRESS";
pub const ENV_UTXO_COUNT_SPLIT: &str = "UTXO_COUNT_SPLIT";
pub const ENV_BLOCKFROST_PROJECT_ID: &str = "BLOCKFROST_PROJECT_ID";
pub const ENV_BLOCKFROST_API_URL: &str = "BLOCKFROST_API_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file plus the process environment.
pub fn load_config(path: Option<&Path>) -> Result<SplitterConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<SplitterConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => SplitterConfig::default(),
    };

    let mut errors = apply_env_overrides(&mut config, lookup);
    if let Err(validation) = validate_config(&config) {
        // An unparsable UTXO_COUNT_SPLIT already explains the zero threshold.
        let env_failed = !errors.is_empty();
        errors.extend(validation.into_iter().filter(|e| {
            !(env_failed
                && matches!(e, ValidationError::OutOfRange { field: "monitor.utxo_count_split", .. }))
        }));
    }

    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// Empty values are treated as unset. Returns the variables that were present
/// but could not be parsed.
pub fn apply_env_overrides<F>(config: &mut SplitterConfig, lookup: F) -> Vec<ValidationError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut errors = Vec::new();
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(address) = get(ENV_MONITOR_ADDRESS) {
        config.monitor.address = address;
    }
    if let Some(address) = get(ENV_SPLIT_LOWER_ADDRESS) {
        config.split.lower_address = address;
    }
    if let Some(address) = get(ENV_SPLIT_HIGHER_ADDRESS) {
        config.split.higher_address = address;
    }
    if let Some(raw) = get(ENV_UTXO_COUNT_SPLIT) {
        match raw.trim().parse::<usize>() {
            Ok(count) => config.monitor.utxo_count_split = count,
            Err(_) => errors.push(ValidationError::InvalidEnv {
                env_var: ENV_UTXO_COUNT_SPLIT,
                value: raw,
                expected: "unsigned integer",
            }),
        }
    }
    if let Some(project_id) = get(ENV_BLOCKFROST_PROJECT_ID) {
        config.blockfrost.project_id = project_id;
    }
    if let Some(url) = get(ENV_BLOCKFROST_API_URL) {
        config.blockfrost.api_url = url;
    }

    errors
}
