//! Integration tests for the checkout path.
//!
//! The walked-through scenario:
//!
//! 1. A fresh wallet holds 10 000.00.
//! 2. A 500.00 item added with a 10% discount prices at 450.00.
//! 3. Checkout succeeds with total 450.00, leaving 9 550.00, one inventory
//!    item with `price_paid` 450.00, and one purchase transaction carrying
//!    the 500.00 list price and the 10% discount.
//!
//! Failure cases must be observationally free of side effects: a failed
//! checkout leaves the whole ledger state identical to the pre-call state.

use anyhow::{Result, anyhow};
use rust_decimal::Decimal;

use ordo::prelude::*;

fn catalog_item(name: &str, category: Category, price: Decimal) -> CatalogItem {
    CatalogItem {
        name: name.to_string(),
        category,
        price,
        description: String::new(),
        attributes: ItemAttributes::default(),
    }
}

fn brl(units: i64) -> Decimal {
    Decimal::new(units * 100, 2)
}

#[test]
fn discounted_checkout_moves_cart_to_inventory() -> Result<()> {
    let mut ledger = Ledger::open(MemoryStore::new())?;
    let item = catalog_item("Tactical Shotgun", Category::Weapons, brl(500));

    ledger.add_to_cart(&item, DiscountPercent::new(10)?)?;
    assert_eq!(ledger.cart().len(), 1);

    let receipt = ledger.checkout()?;

    assert_eq!(receipt.total(), brl(450));
    assert_eq!(ledger.balance(), brl(9_550));
    assert!(ledger.cart().is_empty());

    let owned = ledger
        .inventory()
        .first()
        .ok_or_else(|| anyhow!("inventory should hold the purchased item"))?;
    assert_eq!(owned.price_paid(), brl(450));
    assert_eq!(owned.discount(), DiscountPercent::new(10)?);
    assert_eq!(owned.item().name, "Tactical Shotgun");

    let record = ledger
        .history()
        .first()
        .ok_or_else(|| anyhow!("history should hold the purchase"))?;
    assert_eq!(record.kind(), TransactionKind::Purchase);
    assert_eq!(record.amount(), brl(450));
    assert_eq!(record.original_price(), Some(brl(500)));
    assert_eq!(record.discount(), Some(DiscountPercent::new(10)?));
    assert_eq!(record.category(), Some(Category::Weapons));
    assert_eq!(record.item_name(), Some("Tactical Shotgun"));

    Ok(())
}

#[test]
fn insufficient_funds_leaves_state_untouched() -> Result<()> {
    let policy = LedgerPolicy {
        starting_balance: brl(100),
        ..LedgerPolicy::default()
    };
    let mut ledger = Ledger::open_with_policy(MemoryStore::new(), policy)?;
    let item = catalog_item("Hunting Rifle", Category::Weapons, brl(500));

    ledger.add_to_cart(&item, DiscountPercent::ZERO)?;
    let before = ledger.snapshot().clone();

    let result = ledger.checkout();

    match result {
        Err(LedgerError::InsufficientFunds { required, balance }) => {
            assert_eq!(required, brl(500));
            assert_eq!(balance, brl(100));
        }
        other => return Err(anyhow!("expected InsufficientFunds, got {other:?}")),
    }

    assert_eq!(ledger.snapshot(), &before);
    assert_eq!(ledger.balance(), brl(100));
    assert_eq!(ledger.cart().len(), 1);

    Ok(())
}

#[test]
fn empty_cart_checkout_leaves_state_untouched() -> Result<()> {
    let mut ledger = Ledger::open(MemoryStore::new())?;
    let before = ledger.snapshot().clone();

    assert!(matches!(ledger.checkout(), Err(LedgerError::EmptyCart)));
    assert_eq!(ledger.snapshot(), &before);

    Ok(())
}

#[test]
fn checkout_conserves_balance_exactly() -> Result<()> {
    let mut ledger = Ledger::open(MemoryStore::new())?;
    let before = ledger.balance();

    ledger.add_to_cart(
        &catalog_item("Revolver", Category::Weapons, brl(850)),
        DiscountPercent::new(15)?,
    )?;
    ledger.add_to_cart(
        &catalog_item(".38 Rounds", Category::Ammunition, brl(90)),
        DiscountPercent::ZERO,
    )?;
    ledger.add_to_cart(
        &catalog_item("First Aid Kit", Category::General, Decimal::new(24_999, 2)),
        DiscountPercent::new(33)?,
    )?;

    let expected_total = cart_total(ledger.cart());
    let receipt = ledger.checkout()?;

    assert_eq!(receipt.total(), expected_total);
    assert_eq!(ledger.balance(), before - expected_total);

    // The charged total is exactly the sum of the recorded prices.
    let paid: Decimal = ledger
        .inventory()
        .iter()
        .map(InventoryItem::price_paid)
        .sum();
    assert_eq!(paid, expected_total);

    Ok(())
}

#[test]
fn checkout_converts_every_entry() -> Result<()> {
    let mut ledger = Ledger::open(MemoryStore::new())?;

    for n in 0..5 {
        ledger.add_to_cart(
            &catalog_item(&format!("Flashlight {n}"), Category::General, brl(120)),
            DiscountPercent::ZERO,
        )?;
    }

    let receipt = ledger.checkout()?;

    assert_eq!(receipt.lines().len(), 5);
    assert_eq!(ledger.inventory().len(), 5);
    assert_eq!(ledger.history().len(), 5);
    assert!(ledger.cart().is_empty());

    // Receipt lines point at the inventory records they created.
    for line in receipt.lines() {
        assert!(
            ledger.inventory().iter().any(|i| i.id() == line.inventory_id),
            "line should reference a real inventory item"
        );
    }

    Ok(())
}

#[test]
fn receipt_savings_reflect_discounts() -> Result<()> {
    let mut ledger = Ledger::open(MemoryStore::new())?;

    ledger.add_to_cart(
        &catalog_item("Sealed Grimoire", Category::Paranormal, brl(3_500)),
        DiscountPercent::new(20)?,
    )?;

    let receipt = ledger.checkout()?;

    assert_eq!(receipt.subtotal(), brl(3_500));
    assert_eq!(receipt.total(), brl(2_800));
    assert_eq!(receipt.savings(), brl(700));

    Ok(())
}
