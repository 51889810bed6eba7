//! Bounded retry policy.
//!
//! # Responsibilities
//! - Repeat an operation a fixed number of times with a fixed delay
//! - Stop as soon as a result satisfies the caller's predicate
//! - Log failed attempts without propagating them
//!
//! # Design Decisions
//! - No backoff and no jitter: attempts are evenly spaced
//! - Exhaustion is not an error; the caller receives `None`
//! - No delay after the final attempt

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::ConfirmationConfig;

/// Fixed-count, fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Run `operation` until `accept` returns true or attempts run out.
    ///
    /// `operation` receives the 1-based attempt number. Errors are logged at
    /// `warn` with `label` and count as a failed attempt.
    pub async fn poll_until<T, E, F, Fut, P>(
        &self,
        label: &str,
        mut operation: F,
        mut accept: P,
    ) -> Option<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        P: FnMut(&T) -> bool,
    {
        for attempt in 1..=self.max_attempts {
            match operation(attempt).await {
                Ok(value) if accept(&value) => return Some(value),
                Ok(_) => {
                    tracing::debug!(label, attempt, max = self.max_attempts, "Condition not met yet");
                }
                Err(e) => {
                    tracing::warn!(label, attempt, error = %e, "Attempt failed, trying again");
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.delay).await;
            }
        }

        tracing::info!(label, attempts = self.max_attempts, "Giving up after exhausting retries");
        None
    }
}

impl From<&ConfirmationConfig> for RetryPolicy {
    fn from(config: &ConfirmationConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_secs(config.delay_secs))
    }
}
