//! Pricing
//!
//! Money arithmetic shared by every balance-affecting operation. All amounts
//! are [`Decimal`] currency values carried to two decimal places; whenever an
//! amount is derived (discounts, totals, resale values) it is rounded with
//! [`CURRENCY_ROUNDING`] before it is recorded. Display formatting goes
//! through the same rounding, so a charged total can never differ from the
//! total shown to the player.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};

use crate::cart::CartEntry;

/// Decimal places carried by every monetary amount.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounding strategy applied wherever money is derived.
///
/// Midpoint away from zero, i.e. half-up for the non-negative amounts this
/// ledger deals in.
pub const CURRENCY_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Round an amount to the crate-wide currency precision.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, CURRENCY_ROUNDING)
}

/// Calculates the total charged for a sequence of cart entries.
///
/// Each entry's discounted price is rounded before summing, so the total
/// always equals the sum of the per-item prices recorded at checkout.
#[must_use]
pub fn cart_total(entries: &[CartEntry]) -> Decimal {
    entries.iter().map(CartEntry::discounted_price).sum()
}

/// Calculates the buy-back value of an owned item at the given rate.
#[must_use]
pub fn resale_price(price_paid: Decimal, rate: Decimal) -> Decimal {
    round_currency(price_paid * rate)
}

/// Formats an amount in the storefront currency (BRL).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_currency(amount);

    (rounded * Decimal::ONE_HUNDRED).to_i64().map_or_else(
        || rounded.to_string(),
        |minor| Money::from_minor(minor, iso::BRL).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::{
        cart::{CartEntry, CartEntryId},
        catalog::{CatalogItem, Category, ItemAttributes},
        discounts::DiscountPercent,
    };

    use super::*;

    fn item(price: Decimal) -> CatalogItem {
        CatalogItem {
            name: "Test item".to_string(),
            category: Category::General,
            price,
            description: String::new(),
            attributes: ItemAttributes::default(),
        }
    }

    fn entry(seq: u64, price: Decimal, discount: u8) -> CartEntry {
        let discount = DiscountPercent::new(discount).unwrap_or_default();

        CartEntry::new(CartEntryId::new(seq), item(price), discount)
    }

    #[test]
    fn round_currency_half_up() {
        assert_eq!(
            round_currency(Decimal::new(10_005, 3)), // 10.005
            Decimal::new(1_001, 2),                  // 10.01
        );
    }

    #[test]
    fn round_currency_leaves_two_places_untouched() {
        assert_eq!(
            round_currency(Decimal::new(45_000, 2)),
            Decimal::new(45_000, 2),
        );
    }

    #[test]
    fn cart_total_sums_discounted_prices() {
        let entries = [
            entry(1, Decimal::new(50_000, 2), 10), // 500.00 at 10% -> 450.00
            entry(2, Decimal::new(10_000, 2), 0),  // 100.00
        ];

        assert_eq!(cart_total(&entries), Decimal::new(55_000, 2));
    }

    #[test]
    fn cart_total_empty_is_zero() {
        assert_eq!(cart_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn resale_price_applies_rate() {
        let price = resale_price(Decimal::new(45_000, 2), Decimal::new(70, 2));

        assert_eq!(price, Decimal::new(31_500, 2)); // 450.00 * 0.70 = 315.00
    }

    #[test]
    fn resale_price_rounds_half_up() {
        // 10.05 * 0.70 = 7.035 -> 7.04
        let price = resale_price(Decimal::new(1_005, 2), Decimal::new(70, 2));

        assert_eq!(price, Decimal::new(704, 2));
    }

    #[test]
    fn format_amount_uses_brl() {
        let formatted = format_amount(Decimal::new(45_000, 2));

        assert!(formatted.contains("R$"), "expected BRL symbol: {formatted}");
    }
}
