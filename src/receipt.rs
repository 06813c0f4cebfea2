//! Receipt

use std::io;

use rust_decimal::Decimal;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::{Columns, Rows}},
};
use thiserror::Error;

use crate::{
    catalog::Category,
    discounts::DiscountPercent,
    inventory::InventoryId,
    pricing::format_amount,
};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error writing the rendered receipt.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

/// One checked-out cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Item name.
    pub name: String,

    /// Storefront category.
    pub category: Category,

    /// Undiscounted list price.
    pub list_price: Decimal,

    /// Discount applied at the till.
    pub discount: DiscountPercent,

    /// Price actually charged.
    pub price_paid: Decimal,

    /// Inventory record created for this line.
    pub inventory_id: InventoryId,
}

/// Final receipt for a successful checkout.
///
/// Purely descriptive: the balance debit and inventory additions have
/// already been committed by the time a receipt exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    lines: SmallVec<[ReceiptLine; 8]>,
    total: Decimal,
}

impl CheckoutReceipt {
    pub(crate) fn new(lines: SmallVec<[ReceiptLine; 8]>, total: Decimal) -> Self {
        Self { lines, total }
    }

    /// The checked-out lines, in cart order.
    #[must_use]
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Total charged to the wallet.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Sum of the undiscounted list prices.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(|line| line.list_price).sum()
    }

    /// Amount saved through per-entry discounts.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.subtotal() - self.total
    }

    /// Renders the receipt as a table followed by a total line.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError::Io`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Category", "List Price", "Discount", "Paid"]);

        for line in &self.lines {
            let discount = if line.discount == DiscountPercent::ZERO {
                String::new()
            } else {
                format!("-{}", line.discount)
            };

            builder.push_record([
                line.name.clone(),
                line.category.to_string(),
                format_amount(line.list_price),
                discount,
                format_amount(line.price_paid),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, "Total: {}", format_amount(self.total))?;

        let savings = self.savings();
        if savings > Decimal::ZERO {
            writeln!(out, "Savings: {}", format_amount(savings))?;
        }

        Ok(())
    }
}
