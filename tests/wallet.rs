//! Integration tests for wallet operations, resale, and the audit trail.

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
fn deposit_and_withdrawal_round_trip() -> Result<()> {
    let mut ledger = Ledger::open(MemoryStore::new())?;
    let start = ledger.balance();

    ledger.add_balance(brl(1_000))?;
    assert_eq!(ledger.balance(), start + brl(1_000));

    ledger.remove_balance(brl(400), Some("Informant bribe"))?;
    assert_eq!(ledger.balance(), start + brl(600));

    let kinds: Vec<TransactionKind> = ledger.history().iter().map(Transaction::kind).collect();
    assert_eq!(
        kinds,
        vec![TransactionKind::Deposit, TransactionKind::Withdrawal]
    );

    let withdrawal = ledger
        .history()
        .last()
        .ok_or_else(|| anyhow!("missing withdrawal record"))?;
    assert_eq!(withdrawal.description(), "Informant bribe");
    assert_eq!(withdrawal.amount(), brl(400));

    Ok(())
}

#[test]
fn resale_returns_seventy_percent_of_price_paid() -> Result<()> {
    let mut ledger = Ledger::open(MemoryStore::new())?;
    let item = catalog_item("Tactical Shotgun", Category::Weapons, brl(500));

    ledger.add_to_cart(&item, DiscountPercent::new(10)?)?;
    ledger.checkout()?;
    let after_checkout = ledger.balance();

    let owned_id = ledger
        .inventory()
        .first()
        .map(InventoryItem::id)
        .ok_or_else(|| anyhow!("missing inventory item"))?;

    // price_paid 450.00 -> sale price 315.00
    let sale_price = ledger.sell_item(owned_id)?;

    assert_eq!(sale_price, brl(315));
    assert_eq!(ledger.balance(), after_checkout + brl(315));
    assert!(ledger.inventory().is_empty());

    let record = ledger
        .history()
        .last()
        .ok_or_else(|| anyhow!("missing sale record"))?;
    assert_eq!(record.kind(), TransactionKind::Sale);
    assert_eq!(record.amount(), brl(315));
    assert_eq!(record.item_name(), Some("Tactical Shotgun"));

    Ok(())
}

#[test]
fn selling_twice_fails_the_second_time() -> Result<()> {
    let mut ledger = Ledger::open(MemoryStore::new())?;

    ledger.add_to_cart(
        &catalog_item("Machete", Category::Weapons, brl(300)),
        DiscountPercent::ZERO,
    )?;
    ledger.checkout()?;

    let owned_id = ledger
        .inventory()
        .first()
        .map(InventoryItem::id)
        .ok_or_else(|| anyhow!("missing inventory item"))?;

    ledger.sell_item(owned_id)?;
    let before = ledger.snapshot().clone();

    assert!(matches!(
        ledger.sell_item(owned_id),
        Err(LedgerError::ItemNotFound(_))
    ));
    assert_eq!(ledger.snapshot(), &before);

    Ok(())
}

#[test]
fn history_only_shrinks_on_clear_and_reset() -> Result<()> {
    let mut ledger = Ledger::open(MemoryStore::new())?;
    let mut high_water = 0;

    ledger.add_balance(brl(500))?;
    assert!(ledger.history().len() >= high_water);
    high_water = ledger.history().len();

    ledger.add_to_cart(
        &catalog_item("Climbing Rope", Category::General, brl(80)),
        DiscountPercent::ZERO,
    )?;
    assert!(ledger.history().len() >= high_water);
    high_water = ledger.history().len();

    ledger.checkout()?;
    assert!(ledger.history().len() >= high_water);
    high_water = ledger.history().len();

    ledger.remove_balance(brl(100), None)?;
    assert!(ledger.history().len() >= high_water);

    ledger.clear_history()?;
    assert!(ledger.history().is_empty());

    Ok(())
}

#[test]
fn reset_restores_starting_state_completely() -> Result<()> {
    let mut ledger = Ledger::open(MemoryStore::new())?;

    ledger.add_balance(brl(2_000))?;
    ledger.add_to_cart(
        &catalog_item("Warding Salts", Category::Paranormal, brl(650)),
        DiscountPercent::ZERO,
    )?;
    ledger.checkout()?;
    ledger.add_to_cart(
        &catalog_item("Sigil Chalk", Category::Paranormal, brl(400)),
        DiscountPercent::ZERO,
    )?;

    ledger.reset()?;

    assert_eq!(ledger.balance(), ledger.policy().starting_balance);
    assert!(ledger.cart().is_empty());
    assert!(ledger.inventory().is_empty());
    assert!(ledger.history().is_empty());

    Ok(())
}

#[test]
fn custom_resale_rate_is_honored() -> Result<()> {
    let policy = LedgerPolicy {
        resale_rate: Decimal::new(50, 2), // 0.50
        ..LedgerPolicy::default()
    };
    let mut ledger = Ledger::open_with_policy(MemoryStore::new(), policy)?;

    ledger.add_to_cart(
        &catalog_item("Ballistic Vest", Category::General, brl(1_800)),
        DiscountPercent::ZERO,
    )?;
    ledger.checkout()?;

    let owned_id = ledger
        .inventory()
        .first()
        .map(InventoryItem::id)
        .ok_or_else(|| anyhow!("missing inventory item"))?;

    assert_eq!(ledger.sell_item(owned_id)?, brl(900));

    Ok(())
}
