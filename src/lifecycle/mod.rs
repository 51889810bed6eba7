//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Metrics → API info check → AddressMonitor
//!
//! Shutdown (shutdown.rs):
//!     Signal received → monitor leaves its sleep → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - An in-flight split attempt always runs to completion
//! - Shutdown is only observed between poll cycles

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownListener};
pub use startup::{start, SplitterService, StartupError};
