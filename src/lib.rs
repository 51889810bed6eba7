//! Cardano Address Splitter Library

pub mod blockchain;
pub mod cardano;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod splitter;

pub use config::SplitterConfig;
pub use lifecycle::Shutdown;
pub use splitter::{AddressMonitor, Splitter};
