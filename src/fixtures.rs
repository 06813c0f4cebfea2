//! Fixtures
//!
//! YAML catalog fixture loading. Catalog data is plain content, so it lives
//! in fixture files rather than in code; this module parses a fixture
//! document and validates it into a [`Catalog`].

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, CatalogItem, Category, ItemAttributes};

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading a fixture file.
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A price string could not be parsed as a currency amount.
    #[error("invalid price for item {0}: {1}")]
    InvalidPrice(String, String),

    /// The catalog rejected an item.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// On-disk shape of a catalog fixture document.
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    items: Vec<ItemFixture>,
}

/// On-disk shape of a single item.
///
/// Prices are strings so the document stays precision-exact; they are parsed
/// into [`Decimal`]s here rather than left to the YAML number grammar.
#[derive(Debug, Deserialize)]
struct ItemFixture {
    name: String,
    category: Category,
    price: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    attributes: ItemAttributes,
}

/// Load a catalog fixture set by name from the default `fixtures/catalog`
/// directory.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read, parsed, or
/// validated into a catalog.
pub fn load_catalog(name: &str) -> Result<Catalog, FixtureError> {
    load_catalog_from(PathBuf::from("./fixtures").join("catalog"), name)
}

/// Load a catalog fixture set from a custom base directory.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read, parsed, or
/// validated into a catalog.
pub fn load_catalog_from(base: impl Into<PathBuf>, name: &str) -> Result<Catalog, FixtureError> {
    let path = base.into().join(format!("{name}.yml"));
    let contents = fs::read_to_string(&path)?;
    let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

    let mut catalog = Catalog::new();

    for item in fixture.items {
        let price: Decimal = item
            .price
            .trim()
            .parse()
            .map_err(|_err| FixtureError::InvalidPrice(item.name.clone(), item.price.clone()))?;

        catalog.insert(CatalogItem {
            name: item.name,
            category: item.category,
            price,
            description: item.description,
            attributes: item.attributes,
        })?;
    }

    Ok(catalog)
}
