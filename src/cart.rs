//! Cart

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::CatalogItem,
    discounts::{DiscountPercent, discounted_price},
};

/// Identifier for a single cart insertion.
///
/// Allocated from the ledger's monotonic sequence, so entries added within
/// the same instant still get distinct ids. Used only to address an entry
/// for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartEntryId(u64);

impl CartEntryId {
    pub(crate) fn new(seq: u64) -> Self {
        Self(seq)
    }
}

impl fmt::Display for CartEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One line in the cart: a catalog item snapshot plus its negotiated discount.
///
/// The snapshot is taken when the item is added, so later catalog changes
/// never affect what a buyer is charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    id: CartEntryId,
    item: CatalogItem,
    discount: DiscountPercent,
}

impl CartEntry {
    pub(crate) fn new(id: CartEntryId, item: CatalogItem, discount: DiscountPercent) -> Self {
        Self { id, item, discount }
    }

    /// The entry's unique id.
    #[must_use]
    pub fn id(&self) -> CartEntryId {
        self.id
    }

    /// The item snapshot taken when the entry was added.
    #[must_use]
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// The discount negotiated for this entry.
    #[must_use]
    pub fn discount(&self) -> DiscountPercent {
        self.discount
    }

    /// The price this entry will be charged at checkout.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        discounted_price(self.item.price, self.discount)
    }

    pub(crate) fn into_parts(self) -> (CatalogItem, DiscountPercent) {
        (self.item, self.discount)
    }
}
