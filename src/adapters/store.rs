//! Item store abstraction and the JSON case-manifest implementation
//!
//! The item store answers the questions the export coordinator asks of the
//! case: which items are top-level, which items match a query, and which
//! custodians exist.

use crate::domain::{CustodianName, DocketError, Item, ItemId, ItemSet, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Queries the export coordinator runs against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemQuery {
    /// Items owned by the named custodian
    Custodian(CustodianName),
    /// Items with no assigned custodian
    MissingCustodian,
}

/// Item store trait
///
/// Implementations must be safe to share across tasks; the coordinator only
/// ever calls them from one logical thread of control.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Collapse a raw selection to its de-duplicated top-level items
    ///
    /// # Errors
    ///
    /// Returns an error if a selected item is unknown to the store.
    async fn top_level_items(&self, selection: &ItemSet) -> Result<ItemSet>;

    /// Run a query and return every matching item
    async fn search(&self, query: &ItemQuery) -> Result<ItemSet>;

    /// Enumerate every custodian known to the case, in case order
    async fn custodians(&self) -> Result<Vec<CustodianName>>;

    /// Test whether an item has an assigned custodian
    async fn has_custodian(&self, id: &ItemId) -> Result<bool>;
}

/// On-disk case manifest
#[derive(Debug, Clone, Deserialize)]
pub struct CaseManifest {
    /// Custodians in case order; derived from items when omitted
    #[serde(default)]
    pub custodians: Vec<CustodianName>,

    /// Every item in the case
    pub items: Vec<Item>,
}

/// Item store backed by a JSON case manifest
#[derive(Debug, Clone)]
pub struct ManifestItemStore {
    items: IndexMap<ItemId, Item>,
    custodians: Vec<CustodianName>,
}

impl ManifestItemStore {
    /// Load a manifest from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid manifest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DocketError::Store(format!("Failed to read manifest {}: {}", path.display(), e))
        })?;
        let manifest: CaseManifest = serde_json::from_str(&contents).map_err(|e| {
            DocketError::Store(format!("Invalid manifest {}: {}", path.display(), e))
        })?;

        let store = Self::from_manifest(manifest)?;
        tracing::debug!(
            manifest = %path.display(),
            items = store.items.len(),
            custodians = store.custodians.len(),
            "Loaded case manifest"
        );
        Ok(store)
    }

    /// Build a store from an in-memory manifest
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate item ids or parents that are not in the case.
    pub fn from_manifest(manifest: CaseManifest) -> Result<Self> {
        let mut items = IndexMap::with_capacity(manifest.items.len());
        for item in manifest.items {
            let id = item.id.clone();
            if items.insert(id.clone(), item).is_some() {
                return Err(DocketError::Store(format!("Duplicate item id in manifest: {id}")));
            }
        }

        for item in items.values() {
            if let Some(parent) = &item.parent {
                if !items.contains_key(parent) {
                    return Err(DocketError::Store(format!(
                        "Item {} references unknown parent {}",
                        item.id, parent
                    )));
                }
            }
        }

        let custodians = if manifest.custodians.is_empty() {
            let mut seen: Vec<CustodianName> = Vec::new();
            for name in items.values().filter_map(|item| item.custodian.as_ref()) {
                if !seen.contains(name) {
                    seen.push(name.clone());
                }
            }
            seen
        } else {
            manifest.custodians
        };

        Ok(Self { items, custodians })
    }

    /// Every item id in the case, in manifest order
    pub fn all_items(&self) -> ItemSet {
        self.items.keys().cloned().collect()
    }

    fn get(&self, id: &ItemId) -> Result<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| DocketError::Store(format!("Unknown item: {id}")))
    }

    fn top_level_of(&self, id: &ItemId) -> Result<ItemId> {
        let mut current = self.get(id)?;
        // A well-formed family is never deeper than the case itself
        for _ in 0..=self.items.len() {
            match &current.parent {
                None => return Ok(current.id.clone()),
                Some(parent) => current = self.get(parent)?,
            }
        }
        Err(DocketError::Store(format!(
            "Parent chain of item {id} contains a cycle"
        )))
    }
}

#[async_trait]
impl ItemStore for ManifestItemStore {
    async fn top_level_items(&self, selection: &ItemSet) -> Result<ItemSet> {
        let mut tops = ItemSet::new();
        for id in selection {
            tops.insert(self.top_level_of(id)?);
        }
        Ok(tops)
    }

    async fn search(&self, query: &ItemQuery) -> Result<ItemSet> {
        let matches = self.items.values().filter(|item| match query {
            ItemQuery::Custodian(name) => item.custodian.as_ref() == Some(name),
            ItemQuery::MissingCustodian => !item.has_custodian(),
        });
        Ok(matches.map(|item| item.id.clone()).collect())
    }

    async fn custodians(&self) -> Result<Vec<CustodianName>> {
        Ok(self.custodians.clone())
    }

    async fn has_custodian(&self, id: &ItemId) -> Result<bool> {
        Ok(self.get(id)?.has_custodian())
    }
}

/// Read a selection file: one item id per line, blank lines and `#` comments ignored
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_selection(path: impl AsRef<Path>) -> Result<ItemSet> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        DocketError::Store(format!("Failed to read selection {}: {}", path.display(), e))
    })?;

    let mut selection = ItemSet::new();
    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let id = ItemId::new(line).map_err(DocketError::Store)?;
        selection.insert(id);
    }
    Ok(selection)
}
