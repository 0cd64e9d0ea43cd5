// Docket - Per-custodian export orchestration
// Copyright (c) 2025 Docket Contributors
// Licensed under the MIT License

//! # Docket - Per-custodian export orchestration
//!
//! Docket drives an external export engine over a case's selected items, one
//! custodian at a time, then reorganizes each partition's output and merges
//! the per-partition reports into a single summary report.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Partitioning** a selection into top-level items grouped by custodian
//! - **Exporting** each partition through an [`adapters::ExportEngine`]
//! - **Reorganizing** engine output into `Reports/<custodian>` and renaming message stores
//! - **Summarizing** per-partition reports into one aggregate document
//!
//! ## Architecture
//!
//! Docket follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, reorganize, report)
//! - [`adapters`] - External collaborators (item store, export engine)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docket::adapters::{CommandExportEngine, ManifestItemStore};
//! use docket::config::load_config;
//! use docket::core::export::ExportCoordinator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("docket.toml")?;
//!     let store = Arc::new(ManifestItemStore::load(&config.store.manifest)?);
//!     let engine = Arc::new(CommandExportEngine::new(&config.engine));
//!     let selection = store.all_items();
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = ExportCoordinator::new(&config, store, engine, shutdown_rx)?;
//!     let outcome = coordinator.run(&selection).await?;
//!
//!     std::process::exit(outcome.exit_code());
//! }
//! ```
//!
//! ## Error Handling
//!
//! Docket uses the [`domain::DocketError`] type for all library errors:
//!
//! ```rust,no_run
//! use docket::domain::DocketError;
//!
//! fn example() -> Result<(), DocketError> {
//!     let config = docket::config::load_config("docket.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
