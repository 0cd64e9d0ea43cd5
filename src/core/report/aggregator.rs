//! Report aggregation
//!
//! Merges every per-partition report document under the reports root into
//! one [`AggregateReport`]. Aggregation is best effort: partitions whose
//! document is missing or malformed are left out, never fatal.

use super::parser::{parse_report_file, Counters, PartitionDetails, PartitionReportStats};
use super::xml::XmlElement;
use crate::config::ReportConfig;
use crate::domain::{DocketError, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Merged statistics across all aggregated partitions
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    /// Job start
    pub start_time: DateTime<Utc>,
    /// Time the aggregate was built
    pub end_time: DateTime<Utc>,
    /// Sum of partition export durations, in seconds
    pub export_duration: u64,
    /// Captured configuration with the export directory already rewritten
    pub configuration: Option<XmlElement>,
    pub export_stats: Counters,
    pub file_stats: Counters,
    pub mime_stats: Counters,
    /// One record per aggregated partition, in discovery order
    pub details: Vec<PartitionDetails>,
    /// Derived rate: rate counter divided by export duration
    pub throughput: f64,
}

impl AggregateReport {
    /// Wall-clock duration of the job in fractional seconds
    pub fn processing_duration(&self) -> f64 {
        (self.end_time - self.start_time)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Number of partitions that made it into the aggregate
    pub fn partition_count(&self) -> usize {
        self.details.len()
    }
}

/// Builds an [`AggregateReport`] from the reports tree
#[derive(Debug, Clone)]
pub struct ReportAggregator {
    document_name: String,
    rate_counter: String,
}

impl ReportAggregator {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            document_name: config.document_name.clone(),
            rate_counter: config.rate_counter.clone(),
        }
    }

    /// Aggregate every `reports_root/*/<document>`
    ///
    /// # Errors
    ///
    /// Returns an error only if the reports root exists but cannot be listed.
    pub fn aggregate(
        &self,
        reports_root: &Path,
        job_start: DateTime<Utc>,
        export_dir: &Path,
    ) -> Result<AggregateReport> {
        tracing::info!(reports_root = %reports_root.display(), "Summarizing reports");

        let mut merged = Merge::default();
        for dir in partition_dirs(reports_root)? {
            let document = dir.join(&self.document_name);
            if !document.is_file() {
                tracing::debug!(dir = %dir.display(), "No report document, skipping partition");
                continue;
            }

            tracing::info!(document = %document.display(), "Reading partition report");
            match parse_report_file(&document) {
                Ok(stats) => merged.add(stats),
                Err(e) => {
                    tracing::warn!(
                        document = %document.display(),
                        error = %e,
                        "Excluding malformed partition report"
                    );
                }
            }
        }

        let throughput = self.throughput(&merged);
        let export_dir = export_dir.to_string_lossy();

        Ok(AggregateReport {
            start_time: job_start,
            end_time: Utc::now(),
            export_duration: merged.export_duration,
            configuration: merged
                .configuration
                .map(|c| c.with_export_directory(&export_dir)),
            export_stats: merged.export_stats,
            file_stats: merged.file_stats,
            mime_stats: merged.mime_stats,
            details: merged.details,
            throughput,
        })
    }

    fn throughput(&self, merged: &Merge) -> f64 {
        let exported = merged.file_stats.get(&self.rate_counter).copied().unwrap_or(0);
        if merged.export_duration == 0 {
            tracing::warn!(
                rate_counter = %self.rate_counter,
                exported,
                "Total export duration is zero, reporting throughput as 0"
            );
            return 0.0;
        }
        exported as f64 / merged.export_duration as f64
    }
}

#[derive(Default)]
struct Merge {
    export_duration: u64,
    configuration: Option<XmlElement>,
    export_stats: Counters,
    file_stats: Counters,
    mime_stats: Counters,
    details: Vec<PartitionDetails>,
}

impl Merge {
    fn add(&mut self, stats: PartitionReportStats) {
        self.details.push(stats.details());
        self.export_duration = self.export_duration.saturating_add(stats.export_duration);
        merge_counters(&mut self.export_stats, &stats.export_stats);
        merge_counters(&mut self.file_stats, &stats.file_stats);
        merge_counters(&mut self.mime_stats, &stats.mime_stats);

        let Some(config) = stats.configuration else {
            return;
        };
        if self.configuration.is_none() {
            self.configuration = Some(config);
        } else if self
            .configuration
            .as_ref()
            .is_some_and(|captured| !captured.same_configuration(&config))
        {
            tracing::warn!(
                partition = %stats.name,
                "Export configuration differs from the first partition; keeping the first"
            );
        }
    }
}

/// Additive union: shared keys are summed, new keys are appended
pub fn merge_counters(into: &mut Counters, from: &Counters) {
    for (key, value) in from {
        let entry = into.entry(key.clone()).or_insert(0);
        *entry = entry.saturating_add(*value);
    }
}

/// Immediate subdirectories of the reports root, sorted by name
///
/// A missing reports root yields no partitions.
pub fn partition_dirs(reports_root: &Path) -> Result<Vec<PathBuf>> {
    if !reports_root.exists() {
        tracing::warn!(reports_root = %reports_root.display(), "Reports directory does not exist");
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(reports_root)
        .map_err(|e| DocketError::file_system("list", reports_root, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| DocketError::file_system("list", reports_root, e))?
            .path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}
