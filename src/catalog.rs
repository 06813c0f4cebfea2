//! Catalog
//!
//! The static storefront catalog. The ledger never mutates catalog entries;
//! it copies fields out of a [`CatalogItem`] when a cart entry or inventory
//! record is created, so catalog and ledger lifetimes stay independent.

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Catalog item key
    pub struct ItemKey;
}

/// Errors related to catalog construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An item was given a negative list price.
    #[error("item {0} has a negative price")]
    NegativePrice(String),

    /// Two items share the same name.
    #[error("duplicate item name: {0}")]
    DuplicateName(String),
}

/// Storefront category an item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Combat equipment.
    Weapons,
    /// Ammunition for ranged weapons.
    Ammunition,
    /// General utility gear.
    General,
    /// Paranormal artifacts and ritual components.
    Paranormal,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Weapons => "Weapons",
            Category::Ammunition => "Ammunition",
            Category::General => "General",
            Category::Paranormal => "Paranormal",
        };

        write!(f, "{label}")
    }
}

/// Optional combat and utility attributes shown on an item card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttributes {
    /// Damage roll, e.g. `2d8`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,

    /// Effective range band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Units per purchase (ammunition boxes and the like).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Number of uses before the item is spent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<u32>,

    /// Defense bonus granted while equipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<u32>,

    /// Paranormal element the item is attuned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,

    /// Free-form effect text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

/// A single catalog item. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Item name, unique within the catalog.
    pub name: String,

    /// Storefront category the item is listed under.
    pub category: Category,

    /// Non-negative list price.
    pub price: Decimal,

    /// Flavour and rules text.
    pub description: String,

    /// Optional combat/utility attributes.
    #[serde(default)]
    pub attributes: ItemAttributes,
}

/// The read-only item catalog, keyed by generated [`ItemKey`]s.
#[derive(Debug, Default)]
pub struct Catalog {
    items: SlotMap<ItemKey, CatalogItem>,
    by_name: FxHashMap<String, ItemKey>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: SlotMap::with_key(),
            by_name: FxHashMap::default(),
        }
    }

    /// Insert an item, returning its generated key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NegativePrice`] for a negative list price and
    /// [`CatalogError::DuplicateName`] when an item of that name is already
    /// listed.
    pub fn insert(&mut self, item: CatalogItem) -> Result<ItemKey, CatalogError> {
        if item.price < Decimal::ZERO {
            return Err(CatalogError::NegativePrice(item.name));
        }

        if self.by_name.contains_key(&item.name) {
            return Err(CatalogError::DuplicateName(item.name));
        }

        let name = item.name.clone();
        let key = self.items.insert(item);
        self.by_name.insert(name, key);

        Ok(key)
    }

    /// Look up an item by key.
    #[must_use]
    pub fn get(&self, key: ItemKey) -> Option<&CatalogItem> {
        self.items.get(key)
    }

    /// Look up an item by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CatalogItem> {
        self.by_name.get(name).and_then(|key| self.items.get(*key))
    }

    /// Iterate over every item with its key.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKey, &CatalogItem)> {
        self.items.iter()
    }

    /// Iterate over the items listed under one category.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &CatalogItem> {
        self.items
            .values()
            .filter(move |item| item.category == category)
    }

    /// Number of items in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
