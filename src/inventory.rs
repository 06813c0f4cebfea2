//! Inventory

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{catalog::CatalogItem, discounts::DiscountPercent};

/// Identifier for an owned inventory item.
///
/// Allocated from the same monotonic sequence as every other ledger id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryId(u64);

impl InventoryId {
    pub(crate) fn new(seq: u64) -> Self {
        Self(seq)
    }
}

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// An item the player owns.
///
/// Created only by checkout; destroyed only by selling the item back.
/// `price_paid` is the discounted price actually charged, which is also the
/// base for the resale value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: InventoryId,
    item: CatalogItem,
    purchased_at: Timestamp,
    price_paid: Decimal,
    discount: DiscountPercent,
}

impl InventoryItem {
    pub(crate) fn new(
        id: InventoryId,
        item: CatalogItem,
        purchased_at: Timestamp,
        price_paid: Decimal,
        discount: DiscountPercent,
    ) -> Self {
        Self {
            id,
            item,
            purchased_at,
            price_paid,
            discount,
        }
    }

    /// The item's unique id.
    #[must_use]
    pub fn id(&self) -> InventoryId {
        self.id
    }

    /// The catalog snapshot captured at checkout.
    #[must_use]
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// When the item was checked out.
    #[must_use]
    pub fn purchased_at(&self) -> Timestamp {
        self.purchased_at
    }

    /// The discounted price actually charged.
    #[must_use]
    pub fn price_paid(&self) -> Decimal {
        self.price_paid
    }

    /// The discount applied at checkout.
    #[must_use]
    pub fn discount(&self) -> DiscountPercent {
        self.discount
    }
}
