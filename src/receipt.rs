//! Receipt

use std::fmt;

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{PricingError, format_amount, line_total},
    products::Product,
};

/// How a transaction attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Stock was taken off the shelf and the sale counted.
    Purchased,

    /// Not enough stock; nothing changed.
    Declined,
}

/// Record of a single transaction attempt.
///
/// A receipt borrows the product it was issued for, so the product's stock can't change while
/// the receipt is alive. The declined message reads the stock at render time, which is therefore
/// the stock left by the transaction.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    /// Product the customer asked for
    product: &'a Product,

    /// Units requested
    quantity: u32,

    /// Whether the purchase went through
    outcome: Outcome,

    /// Cashier that handled the transaction
    worker: String,

    /// When the receipt was issued
    issued_at: Timestamp,
}

impl<'a> Receipt<'a> {
    pub(crate) fn new(
        product: &'a Product,
        quantity: u32,
        outcome: Outcome,
        worker: impl Into<String>,
    ) -> Self {
        Self {
            product,
            quantity,
            outcome,
            worker: worker.into(),
            issued_at: Timestamp::now(),
        }
    }

    /// Product the customer asked for
    pub fn product(&self) -> &'a Product {
        self.product
    }

    /// Units requested
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// How the transaction ended
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Check if the purchase went through.
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Purchased
    }

    /// Cashier that handled the transaction
    pub fn worker(&self) -> &str {
        &self.worker
    }

    /// When the receipt was issued
    pub fn issued_at(&self) -> Timestamp {
        self.issued_at
    }

    /// Price of the requested units at the product's effective price.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total can't be represented. Prices are capped at
    /// [`MAX_PRICE`](crate::products::MAX_PRICE), which keeps any `u32` quantity in range.
    pub fn total(&self) -> Result<Money<'static, Currency>, PricingError> {
        line_total(self.product.effective_price(), self.quantity)
    }

    /// Render the customer-facing summary of the transaction.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Purchased => write!(
                f,
                "You have purchased {} {}(s) for {} from {}.",
                self.quantity,
                self.product,
                format_amount(&self.total().map_err(|_err| fmt::Error)?),
                self.worker,
            ),
            Outcome::Declined => write!(
                f,
                "Purchase declined. We only have {} items left.",
                self.product.quantity(),
            ),
        }
    }
}
