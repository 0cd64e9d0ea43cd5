//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "docket.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Docket configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point store.manifest at the case manifest");
                println!("  3. Set engine.program and engine.args for your export engine");
                println!("  4. Validate configuration: docket validate-config");
                println!("  5. Run export: docket export --export-dir <DIR>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> &'static str {
        r#"# Docket Configuration File
# Per-custodian export orchestration

[application]
log_level = "info"

[export]
directory = "export"
naming = "item_name"  # item_name | item_name_with_path

[store]
manifest = "case.json"

[engine]
program = "batch-export"
args = ["--dest", "{destination}", "--path", "{path}", "--naming", "{naming}"]
timeout_secs = 7200

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> &'static str {
        r#"# Docket Configuration File
# Per-custodian export orchestration
#
# Values may reference environment variables as ${VAR_NAME}. Any key listed
# under "Environment overrides" below can also be set as DOCKET_<SECTION>_<KEY>.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Export
# ============================================================================
[export]
# Export root directory (or --export-dir / DOCKET_EXPORT_DIRECTORY)
directory = "export"

# Directory under the export root the engine writes into
items_dir = "Items"

# Directory under the export root holding one folder per custodian
reports_dir = "Reports"

# item_name: one message per top-level item, message stores are renamed
#            to the custodian and moved into the items directory
# item_name_with_path: folder paths preserved, message stores left in place
naming = "item_name"

# Export product and mail format passed to the engine
product = "native"
mail_format = "pst"

# Per-partition details in the summary report are <label>Details/<label>
details_label = "Custodian"

# true: each custodian is exported into Items/<custodian> and every file the
# engine leaves there moves to Reports/<custodian>
per_partition_destination = false

# ============================================================================
# Reorganization
# ============================================================================
[reorganize]
# all_files: move every non-message-store file into Reports/<custodian>
# whitelist: move only the files listed in artifacts
mode = "all_files"
artifacts = ["summary-report.xml", "top-level-MD5-digests.txt"]

# Message stores are named <prefix>*.<extension>
message_store_prefix = "Export"
message_store_extension = "pst"

# ============================================================================
# Summary Report
# ============================================================================
[report]
document_name = "summary-report.xml"
root_element = "Nuix"
# platform_version = "9.10"
rate_counter = "NativeFilesExported"
rate_field = "NativeDocRate"

# Concatenated from every partition into the export root
append_artifacts = ["top-level-MD5-digests.txt"]

# Concatenated keeping only the first file's header line
header_artifacts = ["loadfile.dat"]

# ============================================================================
# Item Store
# ============================================================================
[store]
# JSON case manifest: {"custodians": [...], "items": [{"id", "custodian", "parent"}]}
manifest = "case.json"

# Optional selection file, one item id per line (default: every item)
# selection = "selection.txt"

# ============================================================================
# Export Engine
# ============================================================================
[engine]
# Run once per custodian; item ids are written to stdin one per line.
# Placeholders: {destination} {path} {custodian} {naming} {product} {mail_format}
program = "batch-export"
args = ["--dest", "{destination}", "--path", "{path}", "--naming", "{naming}"]
timeout_secs = 7200

# ============================================================================
# Logging
# ============================================================================
[logging]
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocketConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: DocketConfig = toml::from_str(content).unwrap();
            config.validate().unwrap();
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("docket.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[engine]"));
    }
}
