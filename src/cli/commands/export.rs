//! Export command implementation
//!
//! This module implements the `export` command, which exports the selected
//! items one custodian partition at a time and writes the summary report.

use crate::adapters::{read_selection, CommandExportEngine, ManifestItemStore};
use crate::config::{load_config, DocketConfig};
use crate::core::export::{ExportCoordinator, JobOutcome, JobSummary};
use crate::domain::ItemSet;
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Override the export root directory
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Override the item selection file (one item id per line)
    #[arg(long, value_name = "FILE")]
    pub selection: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        // Apply CLI overrides
        if let Some(dir) = &self.export_dir {
            tracing::info!(export_dir = %dir.display(), "Overriding export directory from CLI");
            config.export.directory = Some(dir.clone());
        }
        if let Some(selection) = &self.selection {
            tracing::info!(selection = %selection.display(), "Overriding item selection from CLI");
            config.store.selection = Some(selection.clone());
        }

        if config.export.directory.is_none() {
            eprintln!("Configuration error: no export directory (set export.directory or use --export-dir)");
            return Ok(2);
        }

        let store = match ManifestItemStore::load(&config.store.manifest) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                log_error_with_context!(e, "Failed to load case manifest");
                eprintln!("Failed to load case manifest: {e}");
                return Ok(5);
            }
        };

        let selection = match &config.store.selection {
            Some(path) => read_selection(path)?,
            None => store.all_items(),
        };

        if !self.yes && !Self::confirm(&config, &selection)? {
            println!("Export cancelled.");
            return Ok(0);
        }

        let engine = Arc::new(CommandExportEngine::new(&config.engine));
        let coordinator = match ExportCoordinator::new(&config, store, engine, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(2);
            }
        };

        println!("🚀 Starting export...");
        println!();

        let outcome = match coordinator.run(&selection).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log_error_with_context!(e, "Export failed");
                eprintln!("Export failed: {e}");
                eprintln!("Partitions already exported remain in {}", coordinator.layout().root().display());
                return Ok(5);
            }
        };

        match &outcome {
            JobOutcome::Completed(summary) => {
                Self::print_summary(summary);
                println!("✅ Export completed successfully!");
            }
            JobOutcome::Aborted(summary) => {
                Self::print_summary(summary);
                println!("⚠️  Export aborted. No summary report was written.");
                println!("   Run `docket summarize` to summarize the partitions already exported.");
                tracing::info!("Export interrupted by user signal");
            }
            JobOutcome::Failed(reason) => {
                println!("❌ Export failed: {reason}");
            }
        }

        let exit_code = outcome.exit_code();
        println!("Exit code: {exit_code}");
        Ok(exit_code)
    }

    fn confirm(config: &DocketConfig, selection: &ItemSet) -> anyhow::Result<bool> {
        use std::io::{self, Write};

        println!("Export Configuration:");
        if let Some(dir) = &config.export.directory {
            println!("  Export directory: {}", dir.display());
        }
        println!("  Case manifest: {}", config.store.manifest.display());
        println!("  Selected items: {}", selection.len());
        println!("  Naming: {}", config.export.naming.as_str());
        println!("  Engine: {}", config.engine.program);
        println!();
        print!("Proceed with export? [y/N]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().eq_ignore_ascii_case("y"))
    }

    fn print_summary(summary: &JobSummary) {
        println!();
        println!("📊 Export Summary:");
        println!("  Export root: {}", summary.export_root.display());
        println!("  Partitions exported: {}", summary.partitions.len());
        for partition in &summary.partitions {
            println!("    - {}: {} items", partition.custodian, partition.items);
        }
        println!(
            "  Items exported: {} of {}",
            summary.exported_items, summary.total_items
        );
        if !summary.unexported_items.is_empty() {
            let unexported: Vec<&str> = summary
                .unexported_items
                .iter()
                .map(|id| id.as_str())
                .collect();
            println!(
                "  ⚠ Not exported ({}): {}",
                unexported.len(),
                unexported.join(", ")
            );
        }
        if !summary.skipped_custodians.is_empty() {
            let skipped: Vec<&str> = summary
                .skipped_custodians
                .iter()
                .map(|c| c.as_str())
                .collect();
            println!("  Skipped custodians: {}", skipped.join(", "));
        }
        if let Some(report) = &summary.summary_report {
            println!("  Summary report: {}", report.display());
        }
        for artifact in &summary.artifacts {
            println!("  Artifact: {}", artifact.display());
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();
    }
}
