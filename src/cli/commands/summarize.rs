//! Summarize command implementation
//!
//! Rebuilds the aggregate summary report and the consolidated artifacts of an
//! existing export root from its per-custodian reports tree.

use crate::config::load_config;
use crate::core::export::ExportLayout;
use crate::core::report::{Summarizer, SummaryOutput};
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the summarize command
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Override the export root directory
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

impl SummarizeArgs {
    /// Execute the summarize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        if let Some(dir) = &self.export_dir {
            config.export.directory = Some(dir.clone());
        }

        let layout = match ExportLayout::from_config(&config) {
            Ok(layout) => layout,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        tracing::info!(export_root = %layout.root().display(), "Summarizing existing export");

        // The original job start is unknown here
        let output = Summarizer::new(&config).summarize(
            layout.reports(),
            layout.root(),
            layout.summary(),
            Utc::now(),
        )?;

        for line in summary_lines(&output) {
            println!("{line}");
        }
        Ok(0)
    }
}

fn summary_lines(output: &SummaryOutput) -> Vec<String> {
    let mut lines = vec![
        format!("📊 Summary report: {}", output.document.display()),
        format!("  Partitions: {}", output.report.partition_count()),
        format!("  Export duration: {}s", output.report.export_duration),
    ];
    lines.extend(
        output
            .artifacts
            .iter()
            .map(|artifact| format!("  Artifact: {}", artifact.display())),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_summarize_empty_export_root() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("docket.toml");
        fs::write(
            &config_path,
            "[store]\nmanifest = \"case.json\"\n\n[engine]\nprogram = \"exporter\"\n",
        )
        .unwrap();
        fs::create_dir(temp.path().join("export")).unwrap();

        let args = SummarizeArgs {
            export_dir: Some(temp.path().join("export")),
        };
        let code = args.execute(config_path.to_str().unwrap()).await.unwrap();

        assert_eq!(code, 0);
        assert!(temp.path().join("export/summary-report.xml").exists());
    }

    #[test]
    fn test_summary_lines_show_whole_seconds() {
        let temp = TempDir::new().unwrap();
        let partition = temp.path().join("Reports/Jones");
        fs::create_dir_all(&partition).unwrap();
        fs::write(
            partition.join("summary-report.xml"),
            r#"<Nuix><Export exportDuration="42.9"><ExportStatistics>
            <SelectedItems>1</SelectedItems><ExcludedCount>0</ExcludedCount>
            <TotalItemsToExport>1</TotalItemsToExport><FailedItems>0</FailedItems>
            </ExportStatistics></Export></Nuix>"#,
        )
        .unwrap();
        let config: crate::config::DocketConfig = toml::from_str(
            "[store]\nmanifest = \"case.json\"\n\n[engine]\nprogram = \"exporter\"\n",
        )
        .unwrap();

        let output = Summarizer::new(&config)
            .summarize(
                &temp.path().join("Reports"),
                temp.path(),
                &temp.path().join("summary-report.xml"),
                Utc::now(),
            )
            .unwrap();
        let lines = summary_lines(&output);

        assert_eq!(lines[1], "  Partitions: 1");
        assert_eq!(lines[2], "  Export duration: 42s");
    }
}
