//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overlay (addresses, threshold, API credentials)
//!     → validation.rs (semantic checks)
//!     → SplitterConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so an environment-only deployment works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BlockfrostConfig, CardanoCliConfig, ConfirmationConfig, LogFormat, MonitorConfig, Network,
    ObservabilityConfig, SplitConfig, SplitterConfig, TransactionConfig,
};
pub use validation::ValidationError;
