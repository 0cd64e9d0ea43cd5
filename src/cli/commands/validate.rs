//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Docket configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates every section
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match &config.export.directory {
            Some(dir) => println!("  Export Directory: {}", dir.display()),
            None => println!("  Export Directory: (set with --export-dir)"),
        }
        println!("  Naming: {}", config.export.naming.as_str());
        println!("  Product: {}", config.export.product);
        println!("  Mail Format: {}", config.export.mail_format);
        println!(
            "  Per-Partition Destination: {}",
            config.export.per_partition_destination
        );
        println!("  Reorganize Mode: {:?}", config.reorganize.mode);
        println!("  Summary Document: {}", config.report.document_name);
        println!("  Case Manifest: {}", config.store.manifest.display());
        if let Some(selection) = &config.store.selection {
            println!("  Selection: {}", selection.display());
        }
        println!("  Engine: {} {}", config.engine.program, config.engine.args.join(" "));
        if let Some(timeout) = config.engine.timeout_secs {
            println!("  Engine Timeout: {timeout}s");
        }
        println!();
        Ok(0)
    }
}
