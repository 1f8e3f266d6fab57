//! Fixtures
//!
//! Shops are described in YAML:
//!
//! ```yaml
//! shop: Red Cross Second Hand shop
//! products:
//!   - name: vase
//!     price: 50 SEK
//!     quantity: 4
//!     category: homeware
//!     discount: 20%
//! ```

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    products::{Product, ProductError},
};

/// The shop the simulator opens with when no other is given.
const BOUTIQUE: &str = include_str!("../fixtures/shops/boutique.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product could not be built
    #[error("Invalid product: {0}")]
    Product(#[from] ProductError),

    /// Product could not be added to the catalog
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Wrapper for a shop in YAML
#[derive(Debug, Deserialize)]
pub struct ShopFixture {
    /// Shop name used to greet customers
    pub shop: String,

    /// Products on sale, in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name, also its catalog key
    pub name: String,

    /// Product price (e.g., "14 SEK")
    pub price: String,

    /// Units in stock
    pub quantity: u32,

    /// Product category
    pub category: String,

    /// Optional discount (e.g., "20%")
    #[serde(default)]
    pub discount: Option<String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        let product = match fixture.discount.as_deref() {
            Some(discount) => Product::discounted(
                fixture.name,
                price,
                fixture.quantity,
                fixture.category,
                parse_percentage(discount)?,
            )?,
            None => Product::new(fixture.name, price, fixture.quantity, fixture.category)?,
        };

        Ok(product)
    }
}

/// A named shop and its stock.
#[derive(Debug)]
pub struct Shop {
    /// Shop name used to greet customers
    pub name: String,

    /// Products on sale
    pub catalog: Catalog,
}

impl Shop {
    /// The built-in second hand boutique.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded fixture is invalid.
    pub fn boutique() -> Result<Self, FixtureError> {
        Self::from_yaml(BOUTIQUE)
    }

    /// Load a shop from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it describes an invalid
    /// catalog.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Build a shop from YAML fixture contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or describes an invalid catalog.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let fixture: ShopFixture = serde_norway::from_str(contents)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: fixture.shop,
            catalog: Catalog::with_products(products)?,
        })
    }
}

/// Read a shelf price such as `14 SEK` or `12.50 GBP`.
///
/// Any ISO 4217 code is accepted. A shelf price is a whole number of minor units, so `1.005 SEK`
/// is rejected rather than rounded.
///
/// # Errors
///
/// - [`FixtureError::InvalidPrice`]: the amount is missing, malformed, or finer than the
///   currency's minor unit.
/// - [`FixtureError::UnknownCurrency`]: the code isn't an ISO currency.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let invalid = || FixtureError::InvalidPrice(s.to_string());

    let (amount, code) = s
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(invalid)?;

    let amount = amount.parse::<Decimal>().map_err(|_err| invalid())?;

    let code = code.trim();
    let currency = iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    if amount.normalize().scale() > currency.exponent {
        return Err(invalid());
    }

    Ok(Money::from_decimal(amount, currency))
}

/// Read a discount written in percent points (`20%`) or as a fraction (`0.2`).
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPercentage`] if the number can't be read.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let (number, per) = match trimmed.strip_suffix('%') {
        Some(points) => (points.trim_end(), Decimal::ONE_HUNDRED),
        None => (trimmed, Decimal::ONE),
    };

    let value = number
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

    Ok(Percentage::from(value / per))
}
