//! Discounts

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors specific to discount configuration.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Discount is negative or would make the product free (or cheaper than free).
    #[error("discount must be at least 0% and below 100%, got {0}%")]
    OutOfRange(Decimal),

    /// The discounted amount can't be represented.
    #[error("discounted price is out of range")]
    Overflow,
}

/// Returns the fractional value of a percentage, e.g. `0.2` for 20%.
pub fn fraction(percent: Percentage) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal
    percent * Decimal::ONE
}

/// Check that a discount lies within `[0%, 100%)`.
///
/// # Errors
///
/// Returns [`DiscountError::OutOfRange`] when the discount is negative or at least 100%.
pub fn validate_discount(percent: Percentage) -> Result<Percentage, DiscountError> {
    let value = fraction(percent);

    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(DiscountError::OutOfRange(percent_points(percent)));
    }

    Ok(percent)
}

/// Converts a fractional percentage to percent points for display.
///
/// Trailing zeros are dropped, so 20% renders as `20` and 12.5% as `12.5`.
pub fn percent_points(percent: Percentage) -> Decimal {
    fraction(percent)
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp(2)
        .normalize()
}

/// Take a percentage off a price.
///
/// The result keeps full precision; amounts are only rounded when they are formatted, so a line
/// of several discounted units is rounded once rather than once per unit.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the discounted amount can't be represented.
pub fn apply_percentage_off(
    price: Money<'static, Currency>,
    percent: Percentage,
) -> Result<Money<'static, Currency>, DiscountError> {
    let discounted = price
        .amount()
        .checked_mul(Decimal::ONE - fraction(percent))
        .ok_or(DiscountError::Overflow)?;

    Ok(Money::from_decimal(discounted, price.currency()))
}
