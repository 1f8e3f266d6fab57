//! Products

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use thiserror::Error;

use crate::discounts::{DiscountError, apply_percentage_off, percent_points, validate_discount};

/// Highest accepted base price, in major units. Any stock of such a product can be totalled.
pub const MAX_PRICE: i64 = 1_000_000_000_000_000;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Errors raised while constructing a product.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// Product price is below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(String),

    /// Product price is above [`MAX_PRICE`] major units.
    #[error("product {0} is priced above {max}", max = MAX_PRICE)]
    PriceTooHigh(String),

    /// Product discount is outside of `[0%, 100%)`.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// A rejected stock update. The product's stock is left untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StockError {
    /// Removing the requested units would take stock below zero.
    #[error("only {available} in stock, {requested} requested")]
    Insufficient {
        /// Units in stock at the time of the update
        available: u32,
        /// Units the update tried to remove
        requested: u64,
    },

    /// Adding the requested units would overflow the stock counter.
    #[error("cannot add {added} to a stock of {available}")]
    Overflow {
        /// Units in stock at the time of the update
        available: u32,
        /// Units the update tried to add
        added: u64,
    },
}

/// How a product's unit price is derived from its base price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pricing {
    /// Sold at the base price.
    Plain,

    /// Sold at the base price less a percentage.
    Discounted(Percentage),
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    name: String,
    price: Money<'static, Currency>,
    quantity: u32,
    category: String,
    pricing: Pricing,
    unit_price: Money<'static, Currency>,
}

impl Product {
    /// Create a product sold at its base price.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::NegativePrice`] if `price` is below zero.
    pub fn new(
        name: impl Into<String>,
        price: Money<'static, Currency>,
        quantity: u32,
        category: impl Into<String>,
    ) -> Result<Self, ProductError> {
        Self::with_pricing(name, price, quantity, category, Pricing::Plain)
    }

    /// Create a product sold with a percentage taken off its base price.
    ///
    /// # Errors
    ///
    /// - [`ProductError::NegativePrice`]: `price` is below zero.
    /// - [`ProductError::Discount`]: `discount` is negative or at least 100%.
    pub fn discounted(
        name: impl Into<String>,
        price: Money<'static, Currency>,
        quantity: u32,
        category: impl Into<String>,
        discount: Percentage,
    ) -> Result<Self, ProductError> {
        let discount = validate_discount(discount)?;

        Self::with_pricing(
            name,
            price,
            quantity,
            category,
            Pricing::Discounted(discount),
        )
    }

    fn with_pricing(
        name: impl Into<String>,
        price: Money<'static, Currency>,
        quantity: u32,
        category: impl Into<String>,
        pricing: Pricing,
    ) -> Result<Self, ProductError> {
        let name = name.into();

        if *price.amount() < Decimal::ZERO {
            return Err(ProductError::NegativePrice(name));
        }

        if *price.amount() > Decimal::from(MAX_PRICE) {
            return Err(ProductError::PriceTooHigh(name));
        }

        let unit_price = match pricing {
            Pricing::Plain => price,
            Pricing::Discounted(discount) => apply_percentage_off(price, discount)?,
        };

        Ok(Self {
            name,
            price,
            quantity,
            category: category.into(),
            pricing,
            unit_price,
        })
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price before any discount
    pub fn price(&self) -> Money<'static, Currency> {
        self.price
    }

    /// Units currently in stock
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Product category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Pricing variant
    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    /// Unit price after any discount, unrounded.
    pub fn effective_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }

    /// Label shown to customers, e.g. `vase` or `(20%) vase`.
    pub fn display_label(&self) -> String {
        self.to_string()
    }

    /// Add `delta` units to the stock, or remove them when `delta` is negative.
    ///
    /// This is the only way stock changes. An update that would leave the stock below zero (or
    /// past `u32::MAX`) is rejected and the stock is left as it was.
    ///
    /// # Errors
    ///
    /// - [`StockError::Insufficient`]: fewer than `-delta` units are in stock.
    /// - [`StockError::Overflow`]: the stock counter can't hold the new total.
    pub fn update_stock(&mut self, delta: i64) -> Result<u32, StockError> {
        let available = self.quantity;

        let Some(updated) = i64::from(available).checked_add(delta) else {
            return Err(StockError::Overflow {
                available,
                added: delta.unsigned_abs(),
            });
        };

        if updated < 0 {
            return Err(StockError::Insufficient {
                available,
                requested: delta.unsigned_abs(),
            });
        }

        self.quantity = u32::try_from(updated).map_err(|_err| StockError::Overflow {
            available,
            added: delta.unsigned_abs(),
        })?;

        Ok(self.quantity)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pricing {
            Pricing::Plain => f.write_str(&self.name),
            Pricing::Discounted(discount) => {
                write!(f, "({}%) {}", percent_points(discount), self.name)
            }
        }
    }
}
