//! Configuration management for Docket.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Docket uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DOCKET_*` environment overrides
//! - Default values for optional settings
//! - Validation of every section
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ExportConfig`] - Export root, subdirectories, naming scheme, product
//! - [`ReorganizeConfig`] - Which engine outputs move into the reports tree
//! - [`ReportConfig`] - Summary document and artifact consolidation
//! - [`StoreConfig`] - Case manifest and item selection
//! - [`EngineConfig`] - External export engine command
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [export]
//! directory = "/cases/1234/export"
//! naming = "item_name"
//!
//! [store]
//! manifest = "/cases/1234/case.json"
//!
//! [engine]
//! program = "batch-export"
//! args = ["--dest", "{destination}", "--path", "{path}", "--naming", "{naming}"]
//! timeout_secs = 7200
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use docket::config::load_config;
//!
//! match load_config("docket.toml") {
//!     Ok(_) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DocketConfig, EngineConfig, ExportConfig, LoggingConfig, NamingScheme,
    ReorganizeConfig, ReorganizeMode, ReportConfig, StoreConfig,
};
