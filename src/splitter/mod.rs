//! Poller/orchestrator.
//!
//! # Data Flow
//! ```text
//! monitor.rs (every interval)
//!     → ChainApi::address_utxos
//!     → plan.rs (select first N, 20/80 split)
//!     → lifecycle.rs (draft → fee → rebuild → sign → submit → confirm)
//!     → workdir.rs (per-attempt directory, always removed)
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: one cycle and one attempt at a time
//! - Cycle errors never stop the loop
//! - Only the higher output pays the fee

pub mod error;
pub mod lifecycle;
pub mod monitor;
pub mod plan;
pub mod workdir;

pub use error::{SplitError, SplitResult};
pub use lifecycle::{SplitReport, SplitSettings, Splitter};
pub use monitor::{AddressMonitor, CycleOutcome};
pub use plan::{PlanError, SplitPlan};
pub use workdir::WorkDir;
