//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Submitted transaction:
//!     → retries.rs (look it up a fixed number of times, fixed delay)
//!     → first non-empty hash ends the loop; exhaustion is logged, not raised
//! ```

pub mod retries;

pub use retries::RetryPolicy;
