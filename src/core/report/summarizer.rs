//! Summary stage: aggregate, write the summary document, consolidate artifacts

use super::aggregator::{AggregateReport, ReportAggregator};
use super::consolidate::ArtifactConsolidator;
use super::document::ReportWriter;
use crate::config::DocketConfig;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Everything the summary stage produced
#[derive(Debug, Clone)]
pub struct SummaryOutput {
    pub report: AggregateReport,
    pub document: PathBuf,
    pub artifacts: Vec<PathBuf>,
}

/// Runs the full summary stage over a reports tree
#[derive(Debug, Clone)]
pub struct Summarizer {
    aggregator: ReportAggregator,
    writer: ReportWriter,
    consolidator: ArtifactConsolidator,
}

impl Summarizer {
    pub fn new(config: &DocketConfig) -> Self {
        Self {
            aggregator: ReportAggregator::new(&config.report),
            writer: ReportWriter::new(&config.report, &config.export),
            consolidator: ArtifactConsolidator::new(&config.report),
        }
    }

    /// Aggregate `reports_root`, write `document`, and consolidate artifacts into `export_root`
    pub fn summarize(
        &self,
        reports_root: &Path,
        export_root: &Path,
        document: &Path,
        job_start: DateTime<Utc>,
    ) -> Result<SummaryOutput> {
        let report = self.aggregator.aggregate(reports_root, job_start, export_root)?;
        self.writer.write(&report, document)?;
        let artifacts = self.consolidator.consolidate(reports_root, export_root)?;

        tracing::info!(
            partitions = report.partition_count(),
            export_duration = report.export_duration,
            throughput = report.throughput,
            document = %document.display(),
            "Summary report written"
        );

        Ok(SummaryOutput {
            report,
            document: document.to_path_buf(),
            artifacts,
        })
    }
}
