//! Export coordinator - main orchestrator for the export process
//!
//! This module drives one export job: it resolves the top-level items,
//! checks every one has a custodian, exports each custodian's partition
//! through the export engine, reorganizes the engine's output and finally
//! writes the aggregate summary.

use crate::adapters::engine::{ExportEngine, ExportRequest};
use crate::adapters::store::{ItemQuery, ItemStore};
use crate::config::{DocketConfig, NamingScheme};
use crate::core::export::layout::ExportLayout;
use crate::core::export::progress::ProgressTracker;
use crate::core::export::summary::{FailureReason, JobOutcome, JobSummary, PartitionSummary};
use crate::core::reorganize::FileReorganizer;
use crate::core::report::Summarizer;
use crate::domain::{ItemId, ItemSet, Result};
use crate::{log_job_complete, log_partition_start};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Export coordinator
pub struct ExportCoordinator {
    layout: ExportLayout,
    naming: NamingScheme,
    product: String,
    mail_format: String,
    store: Arc<dyn ItemStore>,
    engine: Arc<dyn ExportEngine>,
    reorganizer: FileReorganizer,
    summarizer: Summarizer,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a new export coordinator
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the export directory is unset or the
    /// message-store rule cannot be built.
    pub fn new(
        config: &DocketConfig,
        store: Arc<dyn ItemStore>,
        engine: Arc<dyn ExportEngine>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        Ok(Self {
            layout: ExportLayout::from_config(config)?,
            naming: config.export.naming,
            product: config.export.product.clone(),
            mail_format: config.export.mail_format.clone(),
            store,
            engine,
            reorganizer: FileReorganizer::new(&config.export, &config.reorganize)?,
            summarizer: Summarizer::new(config),
            shutdown_signal,
        })
    }

    pub fn layout(&self) -> &ExportLayout {
        &self.layout
    }

    /// Run the export job for a raw item selection
    ///
    /// 1. Resolve the top-level items of the selection
    /// 2. Fail with `MissingCustodian` if any of them has no custodian
    /// 3. For each custodian, in store order:
    ///    - intersect its items with the top-level set, skipping empty partitions
    ///    - stop if an abort was requested
    ///    - export the partition, advance progress, reorganize the output
    ///    - stop once every top-level item is exported
    /// 4. Unless aborted, write the summary report and consolidated artifacts
    ///
    /// # Errors
    ///
    /// Export engine, item store and file system failures are not caught and
    /// end the job; partitions already exported stay on disk.
    pub async fn run(&self, selection: &ItemSet) -> Result<JobOutcome> {
        let started = Instant::now();
        let job_start = Utc::now();

        tracing::info!(selected = selection.len(), "Getting items to export");
        let top_items = self.store.top_level_items(selection).await?;

        let mut progress = ProgressTracker::new(top_items.len() as u64, self.shutdown_signal.clone());
        progress.set_sub_stage(&format!("{} top-level items to export", top_items.len()));

        let missing = self.missing_custodian(&top_items).await?;
        if !missing.is_empty() {
            progress.set_stage("ERROR - Items missing custodian");
            for id in &missing {
                tracing::error!(item = %id, "Item has no custodian");
            }
            return Ok(JobOutcome::Failed(FailureReason::MissingCustodian { items: missing }));
        }

        progress.set_stage(&format!("Exporting to {}", self.layout.root().display()));
        let mut summary = JobSummary {
            export_root: self.layout.root().to_path_buf(),
            total_items: progress.total(),
            ..JobSummary::default()
        };

        let mut exported = ItemSet::new();
        let mut aborted = false;
        for custodian in self.store.custodians().await? {
            if progress.is_complete() {
                break;
            }

            let matches = self
                .store
                .search(&ItemQuery::Custodian(custodian.clone()))
                .await?;
            let partition = top_items.intersection(&matches);
            if partition.is_empty() {
                tracing::debug!(custodian = %custodian, "No top-level items, skipping custodian");
                summary.skipped_custodians.push(custodian);
                continue;
            }

            if progress.is_abort_requested() {
                tracing::warn!(custodian = %custodian, "Abort requested, not starting next partition");
                aborted = true;
                break;
            }

            let count = partition.len() as u64;
            log_partition_start!(&custodian, count);
            progress.set_sub_stage(&format!("Exporting custodian: {custodian} ({count} items)"));

            let destination = self.layout.partition_dir(&custodian);
            let request = ExportRequest {
                destination: destination.clone(),
                custodian: custodian.clone(),
                naming: self.naming,
                product: self.product.clone(),
                mail_format: self.mail_format.clone(),
            };
            self.engine.export_items(&partition, &request).await?;

            for id in &partition {
                exported.insert(id.clone());
            }
            let complete = progress.advance(count)?;
            self.reorganizer
                .reorganize(&destination, &custodian, self.layout.reports())?;

            summary.exported_items = progress.exported();
            summary.partitions.push(PartitionSummary {
                custodian,
                items: count,
            });

            if complete {
                break;
            }
        }

        // Abort requested during the last partition of an incomplete job
        if !aborted && !progress.is_complete() && progress.is_abort_requested() {
            aborted = true;
        }

        if aborted {
            summary.duration = started.elapsed();
            summary.log_summary();
            progress.set_stage("Export aborted");
            return Ok(JobOutcome::Aborted(summary));
        }

        if !progress.is_complete() {
            summary.unexported_items = top_items
                .iter()
                .filter(|id| !exported.contains(id))
                .cloned()
                .collect();
            tracing::warn!(
                exported = progress.exported(),
                total = progress.total(),
                unexported = summary.unexported_items.len(),
                "Custodian enumeration ended before every top-level item was exported"
            );
        }

        progress.set_stage("Preparing summary report");
        let output = self.summarizer.summarize(
            self.layout.reports(),
            self.layout.root(),
            self.layout.summary(),
            job_start,
        )?;
        summary.summary_report = Some(output.document);
        summary.artifacts = output.artifacts;
        summary.duration = started.elapsed();

        log_job_complete!(summary.exported_items, summary.partitions.len(), summary.duration);
        summary.log_summary();
        Ok(JobOutcome::Completed(summary))
    }

    /// Top-level items without a custodian, in top-level order
    async fn missing_custodian(&self, top_items: &ItemSet) -> Result<Vec<ItemId>> {
        let without = self.store.search(&ItemQuery::MissingCustodian).await?;
        Ok(top_items.intersection(&without).into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::{CaseManifest, ManifestItemStore};
    use crate::domain::DocketError;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingEngine {
        calls: Mutex<Vec<(String, usize)>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl ExportEngine for RecordingEngine {
        async fn export_items(&self, items: &ItemSet, request: &ExportRequest) -> Result<()> {
            if self.fail_for.as_deref() == Some(request.custodian.as_str()) {
                return Err(DocketError::ExportEngine("engine crashed".to_string()));
            }
            std::fs::create_dir_all(&request.destination).unwrap();
            self.calls
                .lock()
                .unwrap()
                .push((request.custodian.to_string(), items.len()));
            Ok(())
        }
    }

    fn config(root: PathBuf) -> DocketConfig {
        let mut config: DocketConfig = toml::from_str(
            r#"
[store]
manifest = "case.json"

[engine]
program = "exporter"
"#,
        )
        .unwrap();
        config.export.directory = Some(root);
        config
    }

    fn store(json: &str) -> Arc<ManifestItemStore> {
        let manifest: CaseManifest = serde_json::from_str(json).unwrap();
        Arc::new(ManifestItemStore::from_manifest(manifest).unwrap())
    }

    #[tokio::test]
    async fn test_missing_custodian_fails_before_export() {
        let temp = TempDir::new().unwrap();
        let store = store(r#"{"items": [{"id": "1", "custodian": "A"}, {"id": "2"}]}"#);
        let engine = Arc::new(RecordingEngine::default());
        let (_tx, rx) = watch::channel(false);
        let coordinator =
            ExportCoordinator::new(&config(temp.path().to_path_buf()), store.clone(), engine.clone(), rx)
                .unwrap();

        let outcome = coordinator.run(&store.all_items()).await.unwrap();

        match outcome {
            JobOutcome::Failed(FailureReason::MissingCustodian { items }) => {
                assert_eq!(items, vec![ItemId::new("2").unwrap()]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(engine.calls.lock().unwrap().is_empty());
        assert!(!temp.path().join("Items").exists());
    }

    #[tokio::test]
    async fn test_empty_custodians_are_skipped() {
        let temp = TempDir::new().unwrap();
        let store = store(
            r#"{"custodians": ["Empty", "A"], "items": [{"id": "1", "custodian": "A"}]}"#,
        );
        let engine = Arc::new(RecordingEngine::default());
        let (_tx, rx) = watch::channel(false);
        let coordinator =
            ExportCoordinator::new(&config(temp.path().to_path_buf()), store.clone(), engine.clone(), rx)
                .unwrap();

        let outcome = coordinator.run(&store.all_items()).await.unwrap();
        let summary = outcome.summary().unwrap();
        assert_eq!(summary.skipped_custodians[0].as_str(), "Empty");
        assert_eq!(*engine.calls.lock().unwrap(), vec![("A".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_items_of_unlisted_custodian_are_reported_unexported() {
        let temp = TempDir::new().unwrap();
        let store = store(
            r#"{"custodians": ["A"], "items": [
                {"id": "1", "custodian": "A"},
                {"id": "2", "custodian": "B"},
                {"id": "3", "custodian": "B"}
            ]}"#,
        );
        let engine = Arc::new(RecordingEngine::default());
        let (_tx, rx) = watch::channel(false);
        let coordinator =
            ExportCoordinator::new(&config(temp.path().to_path_buf()), store.clone(), engine.clone(), rx)
                .unwrap();

        let outcome = coordinator.run(&store.all_items()).await.unwrap();

        assert!(matches!(outcome, JobOutcome::Completed(_)));
        let summary = outcome.summary().unwrap();
        assert!(!summary.is_complete());
        assert_eq!(summary.exported_items, 1);
        assert_eq!(
            summary.unexported_items,
            vec![ItemId::new("2").unwrap(), ItemId::new("3").unwrap()]
        );
        assert_eq!(*engine.calls.lock().unwrap(), vec![("A".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_complete_job_has_no_unexported_items() {
        let temp = TempDir::new().unwrap();
        let store = store(r#"{"items": [{"id": "1", "custodian": "A"}]}"#);
        let (_tx, rx) = watch::channel(false);
        let coordinator = ExportCoordinator::new(
            &config(temp.path().to_path_buf()),
            store.clone(),
            Arc::new(RecordingEngine::default()),
            rx,
        )
        .unwrap();

        let outcome = coordinator.run(&store.all_items()).await.unwrap();
        let summary = outcome.summary().unwrap();
        assert!(summary.is_complete());
        assert!(summary.unexported_items.is_empty());
    }

    #[tokio::test]
    async fn test_engine_failure_propagates() {
        let temp = TempDir::new().unwrap();
        let store = store(r#"{"items": [{"id": "1", "custodian": "A"}]}"#);
        let engine = Arc::new(RecordingEngine {
            fail_for: Some("A".to_string()),
            ..RecordingEngine::default()
        });
        let (_tx, rx) = watch::channel(false);
        let coordinator =
            ExportCoordinator::new(&config(temp.path().to_path_buf()), store.clone(), engine, rx)
                .unwrap();

        let err = coordinator.run(&store.all_items()).await.unwrap_err();
        assert!(matches!(err, DocketError::ExportEngine(_)));
    }

    #[tokio::test]
    async fn test_abort_before_first_partition() {
        let temp = TempDir::new().unwrap();
        let store = store(r#"{"items": [{"id": "1", "custodian": "A"}]}"#);
        let engine = Arc::new(RecordingEngine::default());
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let coordinator =
            ExportCoordinator::new(&config(temp.path().to_path_buf()), store.clone(), engine.clone(), rx)
                .unwrap();

        let outcome = coordinator.run(&store.all_items()).await.unwrap();
        assert!(matches!(outcome, JobOutcome::Aborted(_)));
        assert!(engine.calls.lock().unwrap().is_empty());
        assert!(!temp.path().join("summary-report.xml").exists());
    }

    #[test]
    fn test_new_requires_export_directory() {
        let mut config = config(PathBuf::from("/unused"));
        config.export.directory = None;
        let store = store(r#"{"items": []}"#);
        let (_tx, rx) = watch::channel(false);
        let result = ExportCoordinator::new(
            &config,
            store,
            Arc::new(RecordingEngine::default()),
            rx,
        );
        assert!(matches!(result, Err(DocketError::Configuration(_))));
    }
}
