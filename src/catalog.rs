//! Catalog
//!
//! The shop's inventory: every [`Product`] on sale, indexed by a normalized key. Keys are the
//! product name trimmed and lowercased, both when a product is inserted and when it is looked up,
//! so `Coffeecup` and `coffeecup ` find the same product.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::{SlotMap, basic::Values};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    pricing::format_amount,
    products::{Product, ProductKey},
};

/// Errors related to catalog construction.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A product with the same key is already in the catalog.
    #[error("Duplicate product: {0}")]
    DuplicateKey(String),

    /// The product name normalizes to an empty key.
    #[error("Product name cannot be blank")]
    BlankKey,

    /// A product's currency differs from the catalog currency (product, product currency,
    /// catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// Normalize a raw product name or customer request into a catalog key.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Catalog
#[derive(Debug, Default)]
pub struct Catalog {
    /// Products, in insertion order
    products: SlotMap<ProductKey, Product>,

    /// Normalized key -> `SlotMap` key
    keys: FxHashMap<String, ProductKey>,

    /// Currency shared by every product
    currency: Option<&'static Currency>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog stocked with the given products.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if any product can't be inserted.
    pub fn with_products(
        products: impl IntoIterator<Item = Product>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for product in products {
            catalog.insert(product)?;
        }

        Ok(catalog)
    }

    /// Add a product under its normalized name.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::BlankKey`]: the product name is blank.
    /// - [`CatalogError::DuplicateKey`]: a product with the same key already exists.
    /// - [`CatalogError::CurrencyMismatch`]: the product is priced in a different currency.
    pub fn insert(&mut self, product: Product) -> Result<ProductKey, CatalogError> {
        let key = normalize_key(product.name());

        if key.is_empty() {
            return Err(CatalogError::BlankKey);
        }

        if self.keys.contains_key(&key) {
            return Err(CatalogError::DuplicateKey(key));
        }

        let currency = product.price().currency();

        match self.currency {
            Some(existing) if existing != currency => {
                return Err(CatalogError::CurrencyMismatch(
                    key,
                    currency.iso_alpha_code,
                    existing.iso_alpha_code,
                ));
            }
            Some(_) => {}
            None => self.currency = Some(currency),
        }

        let product_key = self.products.insert(product);
        self.keys.insert(key, product_key);

        Ok(product_key)
    }

    /// Find a product by key.
    pub fn lookup(&self, key: &str) -> Option<&Product> {
        self.keys
            .get(&normalize_key(key))
            .and_then(|product_key| self.products.get(*product_key))
    }

    /// Find a product by key, for updating its stock.
    pub fn lookup_mut(&mut self, key: &str) -> Option<&mut Product> {
        let product_key = *self.keys.get(&normalize_key(key))?;

        self.products.get_mut(product_key)
    }

    /// Iterate over products in the order they were added.
    pub fn iter(&self) -> Values<'_, ProductKey, Product> {
        self.products.values()
    }

    /// Get the number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Currency of the catalog, if any product has been added.
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Render the current stock as a table.
    pub fn inventory_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["In stock", "Product", "Category", "Unit price"]);

        for product in self {
            builder.push_record([
                format!("{}x", product.quantity()),
                product.display_label(),
                product.category().to_string(),
                format_amount(&product.effective_price()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(0..1), Alignment::right());
        table.modify(Columns::new(3..4), Alignment::right());

        table.to_string()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = Values<'a, ProductKey, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rusty_money::{
        Money,
        iso::{GBP, SEK},
    };
    use testresult::TestResult;

    use super::*;

    fn test_catalog() -> TestResult<Catalog> {
        Ok(Catalog::with_products([
            Product::new("coffeecup", Money::from_minor(1400, SEK), 20, "kitchenware")?,
            Product::new("spork", Money::from_minor(800, SEK), 5, "kitchenware")?,
            Product::discounted(
                "vase",
                Money::from_minor(5000, SEK),
                4,
                "homeware",
                Percentage::from(0.2),
            )?,
        ])?)
    }

    #[test]
    fn lookup_finds_product_by_exact_key() -> TestResult {
        let catalog = test_catalog()?;

        let product = catalog.lookup("spork").ok_or("spork missing")?;

        assert_eq!(product.name(), "spork");
        assert_eq!(product.quantity(), 5);

        Ok(())
    }

    #[test]
    fn lookup_normalizes_case_and_whitespace() -> TestResult {
        let catalog = test_catalog()?;

        assert!(catalog.lookup("  CoffeeCup ").is_some());
        assert!(catalog.lookup("VASE").is_some());

        Ok(())
    }

    #[test]
    fn lookup_unknown_key_is_none() -> TestResult {
        let catalog = test_catalog()?;

        assert!(catalog.lookup("widget").is_none());

        Ok(())
    }

    #[test]
    fn lookup_mut_updates_stock_in_place() -> TestResult {
        let mut catalog = test_catalog()?;

        catalog
            .lookup_mut("spork")
            .ok_or("spork missing")?
            .update_stock(-2)?;

        assert_eq!(catalog.lookup("spork").map(Product::quantity), Some(3));

        Ok(())
    }

    #[test]
    fn duplicate_keys_are_rejected() -> TestResult {
        let mut catalog = test_catalog()?;

        let result = catalog.insert(Product::new(
            "Spork",
            Money::from_minor(900, SEK),
            1,
            "kitchenware",
        )?);

        assert_eq!(result, Err(CatalogError::DuplicateKey("spork".to_string())));
        assert_eq!(catalog.len(), 3);

        Ok(())
    }

    #[test]
    fn blank_names_are_rejected() -> TestResult {
        let mut catalog = Catalog::new();

        let result = catalog.insert(Product::new("  ", Money::from_minor(100, SEK), 1, "misc")?);

        assert_eq!(result, Err(CatalogError::BlankKey));
        assert!(catalog.is_empty());

        Ok(())
    }

    #[test]
    fn currency_mismatch_is_rejected() -> TestResult {
        let mut catalog = test_catalog()?;

        let result = catalog.insert(Product::new(
            "teapot",
            Money::from_minor(1000, GBP),
            1,
            "kitchenware",
        )?);

        assert_eq!(
            result,
            Err(CatalogError::CurrencyMismatch(
                "teapot".to_string(),
                GBP.iso_alpha_code,
                SEK.iso_alpha_code,
            ))
        );
        assert_eq!(catalog.currency(), Some(SEK));

        Ok(())
    }

    #[test]
    fn iter_preserves_insertion_order() -> TestResult {
        let catalog = test_catalog()?;

        let names: Vec<&str> = catalog.iter().map(Product::name).collect();

        assert_eq!(names, ["coffeecup", "spork", "vase"]);

        Ok(())
    }

    #[test]
    fn inventory_table_lists_stock_and_labels() -> TestResult {
        let catalog = test_catalog()?;

        let table = catalog.inventory_table();

        assert!(table.contains("20x"), "missing coffeecup stock in:\n{table}");
        assert!(table.contains("(20%) vase"), "missing vase label in:\n{table}");
        assert!(table.contains("40.00 SEK"), "missing vase price in:\n{table}");
        assert!(table.contains("kitchenware"), "missing category in:\n{table}");

        Ok(())
    }
}
