//! Item and item set models
//!
//! Items are the unit the item store hands out and the export engine exports.
//! Membership questions during an export are always answered against an
//! [`ItemSet`] of top-level items.

use crate::domain::ids::{CustodianName, ItemId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A single item in the case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable item identifier
    pub id: ItemId,

    /// Owning custodian, if one has been assigned
    #[serde(default)]
    pub custodian: Option<CustodianName>,

    /// Parent (container) item, `None` for top-level items
    #[serde(default)]
    pub parent: Option<ItemId>,
}

impl Item {
    /// Returns true if the item has an assigned custodian
    pub fn has_custodian(&self) -> bool {
        self.custodian.is_some()
    }

    /// Returns true if the item is its own family's top-level item
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// An ordered, de-duplicated set of item identifiers
///
/// Insertion order is kept so logs list items in the order the store
/// returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSet {
    ids: IndexSet<ItemId>,
}

impl ItemSet {
    /// Create an empty item set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items in the set
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the set has no items
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Adds an item, returning false if it was already present
    pub fn insert(&mut self, id: ItemId) -> bool {
        self.ids.insert(id)
    }

    /// Returns true if the set contains the item
    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Iterate over the items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.ids.iter()
    }

    /// Items present in both sets, in `self`'s order
    pub fn intersection(&self, other: &ItemSet) -> ItemSet {
        self.ids
            .iter()
            .filter(|id| other.contains(id))
            .cloned()
            .collect()
    }
}

impl FromIterator<ItemId> for ItemSet {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ItemSet {
    type Item = ItemId;
    type IntoIter = indexmap::set::IntoIter<ItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a ItemId;
    type IntoIter = indexmap::set::Iter<'a, ItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> ItemSet {
        ids.iter().map(|id| ItemId::new(*id).unwrap()).collect()
    }

    #[test]
    fn test_item_set_deduplicates() {
        let items = set(&["a", "b", "a"]);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_intersection_keeps_left_order() {
        let left = set(&["c", "a", "b"]);
        let right = set(&["b", "c", "z"]);
        let both = left.intersection(&right);

        let ids: Vec<&str> = both.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_intersection_with_empty() {
        let left = set(&["a"]);
        assert!(left.intersection(&ItemSet::new()).is_empty());
    }

    #[test]
    fn test_item_flags() {
        let item = Item {
            id: ItemId::new("child").unwrap(),
            custodian: None,
            parent: Some(ItemId::new("parent").unwrap()),
        };
        assert!(!item.has_custodian());
        assert!(!item.is_top_level());
    }
}
