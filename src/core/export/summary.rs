//! Export job outcome and summary
//!
//! This module defines structures for reporting how an export job ended.

use crate::domain::{CustodianName, ItemId};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// One exported partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSummary {
    pub custodian: CustodianName,
    pub items: u64,
}

/// Summary of an export job that ran (completed or aborted)
#[derive(Debug, Clone, Default)]
pub struct JobSummary {
    /// Export root directory
    pub export_root: PathBuf,

    /// Number of top-level items in the job
    pub total_items: u64,

    /// Number of top-level items exported
    pub exported_items: u64,

    /// Partitions exported, in export order
    pub partitions: Vec<PartitionSummary>,

    /// Top-level items no exported partition covered, in top-level order
    pub unexported_items: Vec<ItemId>,

    /// Custodians skipped because no selected top-level item belongs to them
    pub skipped_custodians: Vec<CustodianName>,

    /// Path of the aggregate summary document, if one was written
    pub summary_report: Option<PathBuf>,

    /// Consolidated artifacts written to the export root
    pub artifacts: Vec<PathBuf>,

    /// Wall-clock duration of the job
    pub duration: Duration,
}

impl JobSummary {
    /// Whether every top-level item was exported
    pub fn is_complete(&self) -> bool {
        self.exported_items == self.total_items
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            export_root = %self.export_root.display(),
            total_items = self.total_items,
            exported_items = self.exported_items,
            partitions = self.partitions.len(),
            skipped_custodians = self.skipped_custodians.len(),
            duration_secs = self.duration.as_secs(),
            "Export summary"
        );

        if !self.is_complete() {
            tracing::warn!(
                missing = self.total_items - self.exported_items.min(self.total_items),
                listed = self.unexported_items.len(),
                "Not every top-level item was exported"
            );
        }
    }
}

/// Why a job failed before exporting anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Selected top-level items with no assigned custodian
    MissingCustodian { items: Vec<ItemId> },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MissingCustodian { items } => {
                write!(f, "{} top-level items are missing a custodian", items.len())
            }
        }
    }
}

/// How an export job ended
#[derive(Debug, Clone)]
pub enum JobOutcome {
    /// Every partition was exported and the summary written
    Completed(JobSummary),
    /// An abort was requested before the job completed
    Aborted(JobSummary),
    /// A precondition failed; nothing was exported
    Failed(FailureReason),
}

impl JobOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            JobOutcome::Completed(_) => 0,
            JobOutcome::Failed(FailureReason::MissingCustodian { .. }) => 3,
            JobOutcome::Aborted(_) => 130,
        }
    }

    /// The job summary, if the job ran
    pub fn summary(&self) -> Option<&JobSummary> {
        match self {
            JobOutcome::Completed(summary) | JobOutcome::Aborted(summary) => Some(summary),
            JobOutcome::Failed(_) => None,
        }
    }
}
