//! The embedded pantry collection owned by a user aggregate.
//!
//! Items are addressed by a [`FoodId`] generated at append time. The
//! collection keeps insertion order for display and maintains an id → index
//! map on every mutation, so lookups stay by identity without relying on any
//! implicit subdocument machinery.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use uuid::Uuid;

/// Item identifier, unique within its owning aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoodId(Uuid);

impl FoodId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FoodId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Untrusted form input for creating or overwriting an item.
///
/// The name may be blank here: validation belongs to the persistence layer,
/// which rejects the save rather than the append.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodDraft {
    #[serde(default)]
    pub name: String,
}

/// An embedded food record. Exists only inside a saved aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodItem {
    id: FoodId,
    name: String,
}

impl FoodItem {
    pub fn id(&self) -> &FoodId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// True when the required name is missing or blank.
    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Ordered, owned item collection with identity-addressed access.
#[derive(Debug, Clone, Default)]
pub struct Pantry {
    items: Vec<FoodItem>,
    index: HashMap<FoodId, usize>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a new item built from untrusted input, assigning its identity.
    ///
    /// The append always succeeds; a blank name is caught at save time.
    pub fn append(&mut self, draft: FoodDraft) -> FoodId {
        let id = FoodId::generate();
        self.index.insert(id, self.items.len());
        self.items.push(FoodItem {
            id,
            name: draft.name,
        });
        id
    }

    /// Locate an item by identity. At most one match: identities are unique
    /// within the owner.
    pub fn get(&self, id: &FoodId) -> Option<&FoodItem> {
        self.index.get(id).and_then(|&at| self.items.get(at))
    }

    /// Overwrite the located item's fields with the supplied values.
    ///
    /// Returns `false` when no item carries the identity.
    pub fn set(&mut self, id: &FoodId, draft: FoodDraft) -> bool {
        let Some(item) = self
            .index
            .get(id)
            .copied()
            .and_then(|at| self.items.get_mut(at))
        else {
            return false;
        };
        item.name = draft.name;
        true
    }

    /// Remove the item with a matching identity, preserving the order of the
    /// rest. Removing an unmatched identity is a silent no-op.
    pub fn remove(&mut self, id: &FoodId) -> bool {
        let Some(at) = self.index.remove(id) else {
            return false;
        };
        self.items.remove(at);
        self.reindex();
        true
    }

    /// First item violating the embedded schema, if any.
    pub fn first_invalid(&self) -> Option<&FoodItem> {
        self.items.iter().find(|item| item.has_blank_name())
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(at, item)| (item.id, at))
            .collect();
    }
}

impl PartialEq for Pantry {
    fn eq(&self, other: &Self) -> bool {
        // The index is derived state; item order is what identity means here.
        self.items == other.items
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    fn draft(name: &str) -> FoodDraft {
        FoodDraft {
            name: name.to_owned(),
        }
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut pantry = Pantry::new();
        pantry.append(draft("Milk"));
        pantry.append(draft("Eggs"));
        pantry.append(draft("Flour"));

        let names: Vec<&str> = pantry.items().iter().map(FoodItem::name).collect();
        assert_eq!(names, ["Milk", "Eggs", "Flour"]);
    }

    #[test]
    fn append_assigns_a_fresh_identity() {
        let mut pantry = Pantry::new();
        let first = pantry.append(draft("Milk"));
        let second = pantry.append(draft("Eggs"));
        assert_ne!(first, second);
        assert_eq!(pantry.get(&second).map(FoodItem::name), Some("Eggs"));
    }

    #[test]
    fn set_is_a_total_overwrite() {
        let mut pantry = Pantry::new();
        let id = pantry.append(draft("Milk"));

        assert!(pantry.set(&id, draft("Oat Milk")));
        assert_eq!(pantry.get(&id).map(FoodItem::name), Some("Oat Milk"));
    }

    #[test]
    fn set_reports_unmatched_identity() {
        let mut pantry = Pantry::new();
        pantry.append(draft("Milk"));

        let foreign = "3fa85f64-5717-4562-b3fc-2c963f66afa6"
            .parse()
            .expect("valid id text");
        assert!(!pantry.set(&foreign, draft("Oat Milk")));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut pantry = Pantry::new();
        let keep = pantry.append(draft("Milk"));
        let gone = pantry.append(draft("Eggs"));

        assert!(pantry.remove(&gone));
        assert!(!pantry.remove(&gone));
        assert_eq!(pantry.len(), 1);
        assert_eq!(pantry.get(&keep).map(FoodItem::name), Some("Milk"));
    }

    #[test]
    fn remove_keeps_later_items_addressable() {
        let mut pantry = Pantry::new();
        let first = pantry.append(draft("Milk"));
        let second = pantry.append(draft("Eggs"));
        let third = pantry.append(draft("Flour"));

        pantry.remove(&first);

        assert_eq!(pantry.get(&second).map(FoodItem::name), Some("Eggs"));
        assert_eq!(pantry.get(&third).map(FoodItem::name), Some("Flour"));
        let names: Vec<&str> = pantry.items().iter().map(FoodItem::name).collect();
        assert_eq!(names, ["Eggs", "Flour"]);
    }

    #[test]
    fn blank_names_are_accepted_until_validated() {
        let mut pantry = Pantry::new();
        let id = pantry.append(draft("   "));

        assert_eq!(pantry.len(), 1);
        let invalid = pantry.first_invalid().expect("blank item flagged");
        assert_eq!(invalid.id(), &id);
    }

    #[test]
    fn first_invalid_is_none_for_named_items() {
        let mut pantry = Pantry::new();
        pantry.append(draft("Milk"));
        assert!(pantry.first_invalid().is_none());
    }
}
