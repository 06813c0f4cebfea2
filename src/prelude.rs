//! Ordo prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartEntry, CartEntryId},
    catalog::{Catalog, CatalogError, CatalogItem, Category, ItemAttributes, ItemKey},
    discounts::{DiscountError, DiscountPercent},
    fixtures::{FixtureError, load_catalog, load_catalog_from},
    history::{Transaction, TransactionId, TransactionKind},
    inventory::{InventoryId, InventoryItem},
    ledger::{Ledger, LedgerError, LedgerPolicy, LedgerState},
    persistence::{FileStore, MemoryStore, PersistenceError, PersistenceProvider},
    pricing::{cart_total, format_amount, resale_price, round_currency},
    receipt::{CheckoutReceipt, ReceiptError, ReceiptLine},
};
