//! Progress and cancellation tracking for an export job
//!
//! Holds the job's cumulative exported count and watches the shutdown
//! channel. Cancellation is cooperative: the coordinator checks
//! [`ProgressTracker::is_abort_requested`] between partitions only.

use crate::domain::{DocketError, Result};
use tokio::sync::watch;

/// Job progress counters plus the abort flag
#[derive(Debug)]
pub struct ProgressTracker {
    total: u64,
    exported: u64,
    abort: watch::Receiver<bool>,
}

impl ProgressTracker {
    /// Create a tracker for `total` top-level items
    pub fn new(total: u64, abort: watch::Receiver<bool>) -> Self {
        Self {
            total,
            exported: 0,
            abort,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn exported(&self) -> u64 {
        self.exported
    }

    /// Whether every top-level item has been exported
    pub fn is_complete(&self) -> bool {
        self.exported == self.total
    }

    /// Whether an abort has been requested
    pub fn is_abort_requested(&self) -> bool {
        *self.abort.borrow()
    }

    /// Record `count` exported items and report whether the job is now complete
    ///
    /// # Errors
    ///
    /// Returns a validation error if the count would exceed the job total;
    /// the counter is left unchanged in that case.
    pub fn advance(&mut self, count: u64) -> Result<bool> {
        let exported = self
            .exported
            .checked_add(count)
            .filter(|n| *n <= self.total)
            .ok_or_else(|| {
                DocketError::Validation(format!(
                    "Progress overflow: {} + {} exceeds total of {} items",
                    self.exported, count, self.total
                ))
            })?;
        self.exported = exported;

        tracing::info!(
            exported = self.exported,
            total = self.total,
            "Exported {} of {} items",
            self.exported,
            self.total
        );
        Ok(self.is_complete())
    }

    /// Log a top-level stage transition
    pub fn set_stage(&self, stage: &str) {
        tracing::info!(stage, "{}", stage);
    }

    /// Log a step within the current stage
    pub fn set_sub_stage(&self, sub_stage: &str) {
        tracing::info!(sub_stage, "{}", sub_stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_reaches_completion_once() {
        let (_tx, rx) = watch::channel(false);
        let mut progress = ProgressTracker::new(5, rx);

        assert!(!progress.advance(2).unwrap());
        assert!(!progress.is_complete());
        assert!(progress.advance(3).unwrap());
        assert_eq!(progress.exported(), 5);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_advance_past_total_is_rejected() {
        let (_tx, rx) = watch::channel(false);
        let mut progress = ProgressTracker::new(3, rx);
        progress.advance(2).unwrap();

        assert!(progress.advance(2).is_err());
        assert_eq!(progress.exported(), 2);
    }

    #[test]
    fn test_empty_job_is_complete() {
        let (_tx, rx) = watch::channel(false);
        let progress = ProgressTracker::new(0, rx);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_abort_flag_follows_channel() {
        let (tx, rx) = watch::channel(false);
        let progress = ProgressTracker::new(1, rx);
        assert!(!progress.is_abort_requested());

        tx.send(true).unwrap();
        assert!(progress.is_abort_requested());
    }
}
