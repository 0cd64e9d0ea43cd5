//! Export directory layout

use crate::config::DocketConfig;
use crate::domain::{CustodianName, DocketError, Result};
use std::path::{Path, PathBuf};

/// Resolved paths of one export root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLayout {
    root: PathBuf,
    items: PathBuf,
    reports: PathBuf,
    summary: PathBuf,
    per_partition: bool,
}

impl ExportLayout {
    pub fn new(root: impl Into<PathBuf>, items_dir: &str, reports_dir: &str, document: &str) -> Self {
        let root = root.into();
        Self {
            items: root.join(items_dir),
            reports: root.join(reports_dir),
            summary: root.join(document),
            root,
            per_partition: false,
        }
    }

    /// Give every partition its own `items/<custodian>` destination
    pub fn with_per_partition_destination(mut self, enabled: bool) -> Self {
        self.per_partition = enabled;
        self
    }

    /// Resolve the layout from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no export directory is set.
    pub fn from_config(config: &DocketConfig) -> Result<Self> {
        let root = config.export.directory.as_ref().ok_or_else(|| {
            DocketError::Configuration(
                "export.directory is not set (use --export-dir or DOCKET_EXPORT_DIRECTORY)"
                    .to_string(),
            )
        })?;
        Ok(Self::new(
            root,
            &config.export.items_dir,
            &config.export.reports_dir,
            &config.report.document_name,
        )
        .with_per_partition_destination(config.export.per_partition_destination))
    }

    /// Export root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the export engine writes into
    pub fn items(&self) -> &Path {
        &self.items
    }

    /// Where the engine writes one custodian's partition
    pub fn partition_dir(&self, custodian: &CustodianName) -> PathBuf {
        if self.per_partition {
            self.items.join(custodian.as_str())
        } else {
            self.items.clone()
        }
    }

    /// Root of the per-custodian reports tree
    pub fn reports(&self) -> &Path {
        &self.reports
    }

    /// Path of the aggregate summary document
    pub fn summary(&self) -> &Path {
        &self.summary
    }
}
