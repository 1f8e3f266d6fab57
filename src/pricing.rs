//! Prices

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors raised while totalling a line.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    /// The line total can't be represented.
    #[error("total of {quantity} units is out of range")]
    Overflow {
        /// Units on the line
        quantity: u32,
    },
}

/// Calculates the total price of `quantity` units at `unit_price`.
///
/// The total is not rounded; see [`format_amount`].
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the total can't be represented.
pub fn line_total(
    unit_price: Money<'static, Currency>,
    quantity: u32,
) -> Result<Money<'static, Currency>, PricingError> {
    let total = unit_price
        .amount()
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow { quantity })?;

    Ok(Money::from_decimal(total, unit_price.currency()))
}

/// Formats an amount with two decimals followed by its ISO currency code, e.g. `42.00 SEK`.
///
/// This is the only place amounts are rounded. Halves round away from zero, so `0.625` prints
/// as `0.63`.
pub fn format_amount(money: &Money<'_, Currency>) -> String {
    format!(
        "{:.2} {}",
        money
            .amount()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        money.currency().iso_alpha_code
    )
}
