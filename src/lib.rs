//! Ordo
//!
//! Ordo is a virtual storefront and wallet ledger for tabletop-game campaigns: a catalog-backed cart with per-entry discounts, atomic checkout into an owned inventory, fixed-rate resale, and an append-only transaction history, persisted through a pluggable storage provider.

pub mod cart;
pub mod catalog;
pub mod discounts;
pub mod fixtures;
pub mod history;
pub mod inventory;
pub mod ledger;
pub mod persistence;
pub mod prelude;
pub mod pricing;
pub mod receipt;
