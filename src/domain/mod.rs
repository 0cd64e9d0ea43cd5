//! Domain models and types for Docket.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ItemId`], [`CustodianName`])
//! - **Item models** ([`Item`], [`ItemSet`])
//! - **Error type** ([`DocketError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so an item id can never be passed
//! where a custodian name is expected:
//!
//! ```rust
//! use docket::domain::{CustodianName, ItemId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let item = ItemId::new("guid-123")?;
//! let custodian = CustodianName::new("Jones")?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod item;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::DocketError;
pub use ids::{CustodianName, ItemId};
pub use item::{Item, ItemSet};
pub use result::Result;
