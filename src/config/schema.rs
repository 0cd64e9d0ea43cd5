//! Configuration schema types
//!
//! This module defines the configuration structure for Docket.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Naming scheme passed to the export engine's native product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    /// One message per top-level item; message stores are consolidated per custodian
    #[default]
    ItemName,
    /// Original folder paths are preserved; message stores are left in place
    ItemNameWithPath,
}

impl NamingScheme {
    /// Name understood by the export engine
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingScheme::ItemName => "item_name",
            NamingScheme::ItemNameWithPath => "item_name_with_path",
        }
    }

    /// Whether message-store outputs get renamed after the custodian
    pub fn consolidates_message_stores(&self) -> bool {
        matches!(self, NamingScheme::ItemName)
    }
}

/// Which engine outputs are moved into the reports tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReorganizeMode {
    /// Every regular file except message stores
    #[default]
    AllFiles,
    /// Only the configured report artifacts
    Whitelist,
}

/// Main Docket configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocketConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export job settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Post-export file reorganization
    #[serde(default)]
    pub reorganize: ReorganizeConfig,

    /// Summary report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Item store (case manifest) settings
    pub store: StoreConfig,

    /// External export engine settings
    pub engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DocketConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.reorganize.validate()?;
        self.report.validate()?;
        self.store.validate()?;
        self.engine.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Export root directory (may also be given on the command line)
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Subdirectory of the export root that receives exported items
    #[serde(default = "default_items_dir")]
    pub items_dir: String,

    /// Subdirectory of the export root that receives per-custodian reports
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,

    /// Naming scheme for the native product
    #[serde(default)]
    pub naming: NamingScheme,

    /// Product type requested from the export engine
    #[serde(default = "default_product")]
    pub product: String,

    /// Mail format requested from the export engine
    #[serde(default = "default_mail_format")]
    pub mail_format: String,

    /// Label used for the per-partition details record (`<label>Details`)
    #[serde(default = "default_details_label")]
    pub details_label: String,

    /// Export each custodian into `items_dir/<custodian>` instead of sharing `items_dir`
    #[serde(default)]
    pub per_partition_destination: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(dir) = &self.directory {
            if dir.as_os_str().is_empty() {
                return Err("export.directory cannot be empty".to_string());
            }
        }

        for (field, value) in [
            ("export.items_dir", &self.items_dir),
            ("export.reports_dir", &self.reports_dir),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} cannot be empty"));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(format!(
                    "{field} must be a single directory name, got '{value}'"
                ));
            }
        }

        if self.items_dir == self.reports_dir {
            return Err("export.items_dir and export.reports_dir must differ".to_string());
        }

        if self.product.trim().is_empty() {
            return Err("export.product cannot be empty".to_string());
        }

        if self.details_label.trim().is_empty()
            || !self
                .details_label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(format!(
                "export.details_label must be a non-empty XML name, got '{}'",
                self.details_label
            ));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            items_dir: default_items_dir(),
            reports_dir: default_reports_dir(),
            naming: NamingScheme::default(),
            product: default_product(),
            mail_format: default_mail_format(),
            details_label: default_details_label(),
            per_partition_destination: false,
        }
    }
}

/// File reorganization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorganizeConfig {
    /// Which files get moved into the reports tree
    #[serde(default)]
    pub mode: ReorganizeMode,

    /// Report artifact names moved in `whitelist` mode
    #[serde(default = "default_report_artifacts")]
    pub artifacts: Vec<String>,

    /// File extension of message-store outputs
    #[serde(default = "default_message_store_extension")]
    pub message_store_extension: String,

    /// Engine-generated file name prefix replaced by the custodian name
    #[serde(default = "default_message_store_prefix")]
    pub message_store_prefix: String,
}

impl ReorganizeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.mode == ReorganizeMode::Whitelist && self.artifacts.is_empty() {
            return Err(
                "reorganize.artifacts cannot be empty when reorganize.mode = 'whitelist'"
                    .to_string(),
            );
        }

        if self.message_store_extension.trim().is_empty()
            || self.message_store_extension.starts_with('.')
        {
            return Err(format!(
                "reorganize.message_store_extension must be a bare extension like 'pst', got '{}'",
                self.message_store_extension
            ));
        }

        if self.message_store_prefix.is_empty() {
            return Err("reorganize.message_store_prefix cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for ReorganizeConfig {
    fn default() -> Self {
        Self {
            mode: ReorganizeMode::default(),
            artifacts: default_report_artifacts(),
            message_store_extension: default_message_store_extension(),
            message_store_prefix: default_message_store_prefix(),
        }
    }
}

/// Summary report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// File name of per-partition report documents and of the aggregate
    #[serde(default = "default_document_name")]
    pub document_name: String,

    /// Root element name written on the aggregate document
    #[serde(default = "default_root_element")]
    pub root_element: String,

    /// Platform version attribute written on the root element
    #[serde(default)]
    pub platform_version: Option<String>,

    /// File-statistics counter used as the throughput numerator
    #[serde(default = "default_rate_counter")]
    pub rate_counter: String,

    /// Element name of the derived throughput field
    #[serde(default = "default_rate_field")]
    pub rate_field: String,

    /// Artifacts concatenated verbatim into the export root
    #[serde(default = "default_append_artifacts")]
    pub append_artifacts: Vec<String>,

    /// Tabular artifacts concatenated with a single header line
    #[serde(default = "default_header_artifacts")]
    pub header_artifacts: Vec<String>,
}

impl ReportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.document_name.trim().is_empty() {
            return Err("report.document_name cannot be empty".to_string());
        }
        if self.root_element.trim().is_empty() {
            return Err("report.root_element cannot be empty".to_string());
        }
        if self.rate_counter.trim().is_empty() || self.rate_field.trim().is_empty() {
            return Err("report.rate_counter and report.rate_field cannot be empty".to_string());
        }
        if let Some(name) = self
            .append_artifacts
            .iter()
            .find(|name| self.header_artifacts.contains(name))
        {
            return Err(format!(
                "report artifact '{name}' cannot be both an append and a header artifact"
            ));
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            document_name: default_document_name(),
            root_element: default_root_element(),
            platform_version: None,
            rate_counter: default_rate_counter(),
            rate_field: default_rate_field(),
            append_artifacts: default_append_artifacts(),
            header_artifacts: default_header_artifacts(),
        }
    }
}

/// Item store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON case manifest
    pub manifest: PathBuf,

    /// Optional file listing selected item ids, one per line (default: whole case)
    #[serde(default)]
    pub selection: Option<PathBuf>,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.manifest.as_os_str().is_empty() {
            return Err("store.manifest cannot be empty".to_string());
        }
        Ok(())
    }
}

/// External export engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Program to execute for each partition
    pub program: String,

    /// Arguments; `{destination}`, `{path}`, `{custodian}`, `{naming}`,
    /// `{product}` and `{mail_format}` are substituted per partition
    #[serde(default)]
    pub args: Vec<String>,

    /// Maximum run time of one partition export in seconds (none if unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl EngineConfig {
    fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("engine.program cannot be empty".to_string());
        }
        if self.timeout_secs == Some(0) {
            return Err("engine.timeout_secs must be > 0 when set".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_items_dir() -> String {
    "Items".to_string()
}

fn default_reports_dir() -> String {
    "Reports".to_string()
}

fn default_product() -> String {
    "native".to_string()
}

fn default_mail_format() -> String {
    "pst".to_string()
}

fn default_details_label() -> String {
    "Custodian".to_string()
}

fn default_report_artifacts() -> Vec<String> {
    vec![
        "summary-report.xml".to_string(),
        "top-level-MD5-digests.txt".to_string(),
    ]
}

fn default_message_store_extension() -> String {
    "pst".to_string()
}

fn default_message_store_prefix() -> String {
    "Export".to_string()
}

fn default_document_name() -> String {
    "summary-report.xml".to_string()
}

fn default_root_element() -> String {
    "Nuix".to_string()
}

fn default_rate_counter() -> String {
    "NativeFilesExported".to_string()
}

fn default_rate_field() -> String {
    "NativeDocRate".to_string()
}

fn default_append_artifacts() -> Vec<String> {
    vec!["top-level-MD5-digests.txt".to_string()]
}

fn default_header_artifacts() -> Vec<String> {
    vec!["loadfile.dat".to_string()]
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
