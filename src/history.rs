//! Transaction history
//!
//! The append-only audit trail. Every balance-affecting event produces one
//! [`Transaction`]; records are never edited, and only `clear_history` and
//! `reset` on the ledger can drop them.

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{catalog::{CatalogItem, Category}, discounts::DiscountPercent};

/// Default description recorded for deposits.
pub const DEPOSIT_DESCRIPTION: &str = "Balance deposit";

/// Default description recorded for withdrawals without an explicit one.
pub const WITHDRAWAL_DESCRIPTION: &str = "Balance withdrawal";

/// Identifier for a transaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    pub(crate) fn new(seq: u64) -> Self {
        Self(seq)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The kind of balance-affecting event a record describes.
///
/// `amount` on the record is always a positive magnitude; the direction of
/// the balance change is implied by the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Funds added to the wallet.
    Deposit,
    /// Funds removed from the wallet.
    Withdrawal,
    /// A checkout line; funds left the wallet for an inventory item.
    Purchase,
    /// An inventory item sold back; funds returned to the wallet.
    Sale,
}

/// An immutable audit record for one balance-affecting event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    kind: TransactionKind,
    amount: Decimal,
    timestamp: Timestamp,
    description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    item_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<Category>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_price: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    discount: Option<DiscountPercent>,
}

impl Transaction {
    pub(crate) fn deposit(id: TransactionId, amount: Decimal, at: Timestamp) -> Self {
        Self {
            id,
            kind: TransactionKind::Deposit,
            amount,
            timestamp: at,
            description: DEPOSIT_DESCRIPTION.to_string(),
            item_name: None,
            category: None,
            original_price: None,
            discount: None,
        }
    }

    pub(crate) fn withdrawal(
        id: TransactionId,
        amount: Decimal,
        description: impl Into<String>,
        at: Timestamp,
    ) -> Self {
        Self {
            id,
            kind: TransactionKind::Withdrawal,
            amount,
            timestamp: at,
            description: description.into(),
            item_name: None,
            category: None,
            original_price: None,
            discount: None,
        }
    }

    pub(crate) fn purchase(
        id: TransactionId,
        item: &CatalogItem,
        discount: DiscountPercent,
        price_paid: Decimal,
        at: Timestamp,
    ) -> Self {
        Self {
            id,
            kind: TransactionKind::Purchase,
            amount: price_paid,
            timestamp: at,
            description: format!("Purchase: {}", item.name),
            item_name: Some(item.name.clone()),
            category: Some(item.category),
            original_price: Some(item.price),
            discount: Some(discount),
        }
    }

    pub(crate) fn sale(
        id: TransactionId,
        item: &CatalogItem,
        sale_price: Decimal,
        at: Timestamp,
    ) -> Self {
        Self {
            id,
            kind: TransactionKind::Sale,
            amount: sale_price,
            timestamp: at,
            description: format!("Sale: {}", item.name),
            item_name: Some(item.name.clone()),
            category: Some(item.category),
            original_price: None,
            discount: None,
        }
    }

    /// The record's unique id.
    #[must_use]
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// What kind of event this record describes.
    #[must_use]
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Positive magnitude of the balance change.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// When the event happened.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Human-readable summary of the event.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Name of the item involved, for purchases and sales.
    #[must_use]
    pub fn item_name(&self) -> Option<&str> {
        self.item_name.as_deref()
    }

    /// Category of the item involved, for purchases and sales.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Undiscounted list price, for purchases.
    #[must_use]
    pub fn original_price(&self) -> Option<Decimal> {
        self.original_price
    }

    /// Discount applied, for purchases.
    #[must_use]
    pub fn discount(&self) -> Option<DiscountPercent> {
        self.discount
    }
}
