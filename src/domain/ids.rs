//! Domain identifier types with validation
//!
//! Newtype wrappers so item identifiers and custodian names cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Item identifier newtype wrapper
///
/// Represents the stable identifier (GUID) of an item in the case.
///
/// # Examples
///
/// ```
/// use docket::domain::ids::ItemId;
/// use std::str::FromStr;
///
/// let id = ItemId::from_str("3f2c9a1e-0d4b-4e7a-9b8c-2a1d5e6f7a8b").unwrap();
/// assert_eq!(id.as_str(), "3f2c9a1e-0d4b-4e7a-9b8c-2a1d5e6f7a8b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new ItemId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(ItemId)` if the ID is non-empty, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Item ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the item ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ItemId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Custodian name newtype wrapper
///
/// The partition key of an export job. The name is used verbatim as a
/// directory name under the reports tree and as the PST file prefix, so it
/// may not contain path separators.
///
/// # Examples
///
/// ```
/// use docket::domain::ids::CustodianName;
///
/// let name = CustodianName::new("Jones").unwrap();
/// assert_eq!(name.as_str(), "Jones");
/// assert!(CustodianName::new("a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustodianName(String);

impl CustodianName {
    /// Creates a new CustodianName from a string
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Custodian name cannot be empty".to_string());
        }
        if name.contains('/') || name.contains('\\') {
            return Err(format!(
                "Custodian name cannot contain path separators, got: {name}"
            ));
        }
        if name == "." || name == ".." {
            return Err(format!("Invalid custodian name: {name}"));
        }
        Ok(Self(name))
    }

    /// Returns the custodian name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CustodianName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustodianName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CustodianName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustodianName> for String {
    fn from(name: CustodianName) -> Self {
        name.0
    }
}

impl AsRef<str> for CustodianName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
