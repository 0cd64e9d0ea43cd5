//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Docket using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Docket - Per-custodian export orchestration
#[derive(Parser, Debug)]
#[command(name = "docket")]
#[command(version, about, long_about = None)]
#[command(author = "Docket Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "docket.toml", env = "DOCKET_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DOCKET_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the selected items, one engine run per custodian
    Export(commands::export::ExportArgs),

    /// Rebuild the summary report and artifacts of an existing export
    Summarize(commands::summarize::SummarizeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
