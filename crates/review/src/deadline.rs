//! # Deadlines
//!
//! Every engine operation is bounded by a caller-supplied deadline. When it expires the pending unit of
//! work is dropped, which rolls the transaction back, and the caller receives a transient error.

use std::{future::Future, time::Duration};

use error::AppError;
use tokio::time::Instant;

/// Default budget for a single operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Point in time after which an operation is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Instant,
}

impl Deadline {
    /// Deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            expires_at: Instant::now() + timeout,
        }
    }

    /// Run `work` until it completes or the deadline passes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Timeout`] naming `operation` when the deadline passes first, otherwise whatever
    /// `work` returns.
    pub async fn run<T, F>(&self, operation: &'static str, work: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout_at(self.expires_at, work).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(target: "lifecycle", operation, "Operation exceeded its deadline, rolled back");
                Err(AppError::timeout(operation))
            },
        }
    }
}

impl Default for Deadline {
    fn default() -> Self { Self::after(DEFAULT_TIMEOUT) }
}
