//! Core business logic for Docket.
//!
//! # Modules
//!
//! - [`export`] - Export orchestration, progress tracking, job outcomes
//! - [`reorganize`] - Moving engine output into the reports tree
//! - [`report`] - Parsing, aggregating and writing summary reports
//!
//! # Export Workflow
//!
//! 1. **Resolve**: collapse the selection to top-level items
//! 2. **Check**: every top-level item must have a custodian
//! 3. **Export**: one export engine run per non-empty custodian partition
//! 4. **Reorganize**: move reports into `Reports/<custodian>`, rename message stores
//! 5. **Summarize**: aggregate partition reports and consolidate artifacts
//!
//! # Example
//!
//! ```rust,no_run
//! use docket::adapters::{CommandExportEngine, ManifestItemStore};
//! use docket::config::load_config;
//! use docket::core::export::ExportCoordinator;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("docket.toml")?;
//! let store = Arc::new(ManifestItemStore::load(&config.store.manifest)?);
//! let engine = Arc::new(CommandExportEngine::new(&config.engine));
//! let selection = store.all_items();
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = ExportCoordinator::new(&config, store, engine, shutdown_rx)?;
//!
//! let outcome = coordinator.run(&selection).await?;
//! println!("Exit code: {}", outcome.exit_code());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod reorganize;
pub mod report;
