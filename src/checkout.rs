//! Checkout

use tracing::{debug, info};

use crate::{
    products::Product,
    receipt::{Outcome, Receipt},
};

/// A register staffed by one cashier.
#[derive(Debug, Clone)]
pub struct Checkout {
    /// Cashier working the register
    worker: String,

    /// Transactions that went through, regardless of how many units each one sold
    completed_sales: u32,
}

impl Checkout {
    /// Open a register for the given cashier.
    pub fn new(worker: impl Into<String>) -> Self {
        Self {
            worker: worker.into(),
            completed_sales: 0,
        }
    }

    /// Cashier working the register
    pub fn worker(&self) -> &str {
        &self.worker
    }

    /// Number of successful transactions so far.
    pub fn completed_sales(&self) -> u32 {
        self.completed_sales
    }

    /// Sell `quantity` units of `product`.
    ///
    /// Stock is checked and taken in a single step. When there isn't enough stock the receipt is
    /// declined and neither the product nor the sales count change. `quantity` is expected to be
    /// positive.
    #[tracing::instrument(
        name = "checkout.transaction",
        skip_all,
        fields(worker = %self.worker, product = %product.name(), quantity = quantity)
    )]
    pub fn transaction<'a>(&mut self, product: &'a mut Product, quantity: u32) -> Receipt<'a> {
        let outcome = match product.update_stock(-i64::from(quantity)) {
            Ok(remaining) => {
                self.completed_sales = self.completed_sales.saturating_add(1);
                info!(remaining, completed_sales = self.completed_sales, "sale completed");

                Outcome::Purchased
            }
            Err(error) => {
                debug!(%error, "purchase declined");

                Outcome::Declined
            }
        };

        Receipt::new(product, quantity, outcome, self.worker.as_str())
    }
}
