//! External system integrations for Docket.
//!
//! - [`store`] - Item store (case database) abstraction and JSON manifest implementation
//! - [`engine`] - Batch-export engine abstraction and external command implementation
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the export
//! coordinator can be tested with in-memory implementations.
//!
//! ```rust,no_run
//! use docket::adapters::store::{ItemQuery, ItemStore, ManifestItemStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ManifestItemStore::load("case.json")?;
//! let missing = store.search(&ItemQuery::MissingCustodian).await?;
//! println!("{} items without custodian", missing.len());
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod store;

pub use engine::{CommandExportEngine, ExportEngine, ExportRequest};
pub use store::{read_selection, CaseManifest, ItemQuery, ItemStore, ManifestItemStore};
