//! Export orchestration
//!
//! This module provides the core export logic for Docket, including:
//! - Export coordination across custodian partitions
//! - Progress and cancellation tracking
//! - Export directory layout
//! - Job outcome and summary

pub mod coordinator;
pub mod layout;
pub mod progress;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use layout::ExportLayout;
pub use progress::ProgressTracker;
pub use summary::{FailureReason, JobOutcome, JobSummary, PartitionSummary};
