//! Ledger
//!
//! The single state container behind every storefront surface: wallet
//! balance, cart, owned inventory, and the transaction history, with the
//! state transitions that connect them. Construct one [`Ledger`] per running
//! application and hand it to whatever consumes it; operations take
//! `&mut self`, so access is single-writer by construction. Callers that
//! introduce real concurrency must serialize operations per wallet
//! themselves: two interleaved checkouts against one balance are exactly
//! what the atomicity contract forbids.

use std::mem;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cart::{CartEntry, CartEntryId},
    catalog::CatalogItem,
    discounts::DiscountPercent,
    history::{self, Transaction, TransactionId},
    inventory::{InventoryId, InventoryItem},
    persistence::{PersistenceError, PersistenceProvider},
    pricing::{cart_total, resale_price, round_currency},
    receipt::{CheckoutReceipt, ReceiptLine},
};

/// Errors surfaced by ledger operations.
///
/// The domain failures (`EmptyCart`, `InsufficientFunds`, `ItemNotFound`,
/// `InvalidAmount`) leave the state exactly as it was before the call.
/// `Persistence` is different: the in-memory mutation has already committed
/// and only the durable write failed, so the caller holds a state that has
/// diverged from storage.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Checkout attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The wallet cannot cover the requested amount.
    #[error("insufficient funds: need {required}, have {balance}")]
    InsufficientFunds {
        /// Amount the operation required.
        required: Decimal,
        /// Balance at the time of the attempt.
        balance: Decimal,
    },

    /// No inventory item with the given id.
    #[error("no inventory item with id {0}")]
    ItemNotFound(InventoryId),

    /// Deposit or withdrawal amount was zero or negative.
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// The durable save failed after the in-memory state was updated.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Policy constants for a campaign economy.
///
/// Kept as data so a table can tune its economy without touching the
/// operations that apply it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerPolicy {
    /// Balance a fresh (or reset) ledger starts with.
    pub starting_balance: Decimal,

    /// Fraction of the purchase price returned when an item is sold back.
    pub resale_rate: Decimal,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            starting_balance: Decimal::new(1_000_000, 2), // 10 000.00
            resale_rate: Decimal::new(70, 2),             // 0.70
        }
    }
}

/// The aggregate ledger state. Also the document the persistence provider
/// stores.
///
/// `sequence` is the monotonic source of every cart, inventory, and
/// transaction id; it is persisted with the rest of the state so ids stay
/// unique across restarts, and it survives `reset` so ids are never reused
/// within a process lifetime either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    balance: Decimal,
    cart: Vec<CartEntry>,
    inventory: Vec<InventoryItem>,
    history: Vec<Transaction>,
    sequence: u64,
}

impl LedgerState {
    fn fresh(starting_balance: Decimal) -> Self {
        Self {
            balance: starting_balance,
            cart: Vec::new(),
            inventory: Vec::new(),
            history: Vec::new(),
            sequence: 0,
        }
    }

    /// Current wallet balance.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Cart entries in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartEntry] {
        &self.cart
    }

    /// Owned inventory in purchase order.
    #[must_use]
    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    /// Transaction history in chronological order.
    #[must_use]
    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    fn next_seq(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

/// The ledger store.
///
/// Owns a [`LedgerState`], applies every state transition, and saves through
/// its persistence provider after each transition that changed something.
#[derive(Debug)]
pub struct Ledger<P> {
    state: LedgerState,
    provider: P,
    policy: LedgerPolicy,
}

impl<P: PersistenceProvider> Ledger<P> {
    /// Open a ledger backed by `provider` with the default policy, loading
    /// the saved snapshot if one exists and starting fresh otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if a snapshot exists but cannot be
    /// loaded.
    pub fn open(provider: P) -> Result<Self, PersistenceError> {
        Self::open_with_policy(provider, LedgerPolicy::default())
    }

    /// Open a ledger with explicit policy constants.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if a snapshot exists but cannot be
    /// loaded.
    pub fn open_with_policy(provider: P, policy: LedgerPolicy) -> Result<Self, PersistenceError> {
        let state = match provider.load()? {
            Some(state) => state,
            None => LedgerState::fresh(policy.starting_balance),
        };

        Ok(Self {
            state,
            provider,
            policy,
        })
    }

    /// Read-only view of the current state. Reflects the most recently
    /// committed mutation.
    #[must_use]
    pub fn snapshot(&self) -> &LedgerState {
        &self.state
    }

    /// Current wallet balance.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.state.balance
    }

    /// Cart entries in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartEntry] {
        &self.state.cart
    }

    /// Owned inventory in purchase order.
    #[must_use]
    pub fn inventory(&self) -> &[InventoryItem] {
        &self.state.inventory
    }

    /// Transaction history in chronological order.
    #[must_use]
    pub fn history(&self) -> &[Transaction] {
        &self.state.history
    }

    /// The policy this ledger was opened with.
    #[must_use]
    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    /// The persistence provider backing this ledger.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Append a catalog item to the cart under the given discount.
    ///
    /// Snapshots the item, so later catalog changes don't reprice the entry.
    /// No balance or history effect until checkout.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the post-commit save failed;
    /// the entry is in the cart regardless.
    pub fn add_to_cart(
        &mut self,
        item: &CatalogItem,
        discount: DiscountPercent,
    ) -> Result<CartEntryId, LedgerError> {
        let id = CartEntryId::new(self.state.next_seq());
        self.state
            .cart
            .push(CartEntry::new(id, item.clone(), discount));
        self.commit()?;

        Ok(id)
    }

    /// Remove the cart entry with the given id. Removing an id that is not
    /// in the cart is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the post-commit save failed.
    pub fn remove_from_cart(&mut self, id: CartEntryId) -> Result<(), LedgerError> {
        let before = self.state.cart.len();
        self.state.cart.retain(|entry| entry.id() != id);

        if self.state.cart.len() == before {
            return Ok(());
        }

        self.commit()
    }

    /// Empty the cart unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the post-commit save failed.
    pub fn clear_cart(&mut self) -> Result<(), LedgerError> {
        if self.state.cart.is_empty() {
            return Ok(());
        }

        self.state.cart.clear();
        self.commit()
    }

    /// Convert the cart into owned inventory, debiting the wallet.
    ///
    /// All-or-nothing: on any failure the state is exactly as it was before
    /// the call. On success every cart entry has become one inventory item
    /// and one purchase transaction, the cart is empty, and the balance has
    /// dropped by the receipt total (the sum of the per-entry discounted
    /// prices).
    ///
    /// # Errors
    ///
    /// - [`LedgerError::EmptyCart`] if there is nothing to check out.
    /// - [`LedgerError::InsufficientFunds`] if the total exceeds the
    ///   balance.
    /// - [`LedgerError::Persistence`] if the post-commit save failed; the
    ///   purchase itself has been applied.
    pub fn checkout(&mut self) -> Result<CheckoutReceipt, LedgerError> {
        if self.state.cart.is_empty() {
            return Err(LedgerError::EmptyCart);
        }

        let total = cart_total(&self.state.cart);
        if self.state.balance < total {
            return Err(LedgerError::InsufficientFunds {
                required: total,
                balance: self.state.balance,
            });
        }

        // Past this point every step is infallible, which is what makes the
        // operation atomic.
        let now = Timestamp::now();
        let entries = mem::take(&mut self.state.cart);
        let mut lines: SmallVec<[ReceiptLine; 8]> = SmallVec::new();

        for entry in entries {
            let price_paid = entry.discounted_price();
            let inventory_id = InventoryId::new(self.state.next_seq());
            let transaction_id = TransactionId::new(self.state.next_seq());
            let (item, discount) = entry.into_parts();

            lines.push(ReceiptLine {
                name: item.name.clone(),
                category: item.category,
                list_price: item.price,
                discount,
                price_paid,
                inventory_id,
            });

            self.state
                .history
                .push(Transaction::purchase(transaction_id, &item, discount, price_paid, now));
            self.state
                .inventory
                .push(InventoryItem::new(inventory_id, item, now, price_paid, discount));
        }

        self.state.balance -= total;
        self.commit()?;

        Ok(CheckoutReceipt::new(lines, total))
    }

    /// Deposit funds into the wallet and record a deposit transaction.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if `amount` is not positive after
    ///   rounding to currency precision.
    /// - [`LedgerError::Persistence`] if the post-commit save failed.
    pub fn add_balance(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        let amount = positive_amount(amount)?;
        let id = TransactionId::new(self.state.next_seq());

        self.state.balance += amount;
        self.state
            .history
            .push(Transaction::deposit(id, amount, Timestamp::now()));
        self.commit()
    }

    /// Withdraw funds from the wallet and record a withdrawal transaction.
    ///
    /// Overdrafts are rejected: the withdrawal must be covered by the
    /// current balance, the same guard checkout applies.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if `amount` is not positive after
    ///   rounding to currency precision.
    /// - [`LedgerError::InsufficientFunds`] if `amount` exceeds the balance.
    /// - [`LedgerError::Persistence`] if the post-commit save failed.
    pub fn remove_balance(
        &mut self,
        amount: Decimal,
        description: Option<&str>,
    ) -> Result<(), LedgerError> {
        let amount = positive_amount(amount)?;

        if self.state.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                required: amount,
                balance: self.state.balance,
            });
        }

        let id = TransactionId::new(self.state.next_seq());
        let description = description.unwrap_or(history::WITHDRAWAL_DESCRIPTION);

        self.state.balance -= amount;
        self.state
            .history
            .push(Transaction::withdrawal(id, amount, description, Timestamp::now()));
        self.commit()
    }

    /// Sell an owned item back at the policy resale rate. Returns the
    /// credited sale price.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::ItemNotFound`] if no inventory item has `id`; the
    ///   state is untouched.
    /// - [`LedgerError::Persistence`] if the post-commit save failed; the
    ///   sale itself has been applied.
    pub fn sell_item(&mut self, id: InventoryId) -> Result<Decimal, LedgerError> {
        let index = self
            .state
            .inventory
            .iter()
            .position(|item| item.id() == id)
            .ok_or(LedgerError::ItemNotFound(id))?;

        let sold = self.state.inventory.remove(index);
        let sale_price = resale_price(sold.price_paid(), self.policy.resale_rate);
        let transaction_id = TransactionId::new(self.state.next_seq());

        self.state.balance += sale_price;
        self.state
            .history
            .push(Transaction::sale(transaction_id, sold.item(), sale_price, Timestamp::now()));
        self.commit()?;

        Ok(sale_price)
    }

    /// Drop the transaction history. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the post-commit save failed.
    pub fn clear_history(&mut self) -> Result<(), LedgerError> {
        if self.state.history.is_empty() {
            return Ok(());
        }

        self.state.history.clear();
        self.commit()
    }

    /// Restore the starting balance and empty cart, inventory, and history.
    /// Irreversible. The id sequence is deliberately not rewound, so ids are
    /// never reused across a reset.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the post-commit save failed.
    pub fn reset(&mut self) -> Result<(), LedgerError> {
        self.state.balance = self.policy.starting_balance;
        self.state.cart.clear();
        self.state.inventory.clear();
        self.state.history.clear();
        self.commit()
    }

    /// Post-commit hook: every mutating operation ends here.
    fn commit(&self) -> Result<(), LedgerError> {
        self.provider.save(&self.state)?;

        Ok(())
    }
}

/// Round to currency precision and require a positive result.
fn positive_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    let rounded = round_currency(amount);

    if rounded <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount));
    }

    Ok(rounded)
}
