//! Minor-Unit Pricing
//!
//! Converts decimal unit prices into the integer minor-currency-unit amounts
//! the payment provider expects.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{CatalogError, Result};

/// Minor units per major currency unit (cents per dollar)
pub const MINOR_UNITS_PER_MAJOR: Decimal = dec!(100);

/// Compute `round(price × 100 × quantity)` as integer minor units
///
/// Midpoints round away from zero, so a two-decimal price never loses a cent
/// across pack sizes.
pub fn amount_minor(unit_price: Decimal, quantity: u32) -> Result<i64> {
    let overflow = || CatalogError::AmountOverflow {
        price: unit_price,
        quantity,
    };

    let total = unit_price
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .and_then(|cents| cents.checked_mul(Decimal::from(quantity)))
        .ok_or_else(overflow)?;

    total
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_is_price_times_quantity_in_cents() {
        assert_eq!(amount_minor(dec!(32.22), 3).unwrap(), 9666);
        assert_eq!(amount_minor(dec!(40.28), 1).unwrap(), 4028);
        assert_eq!(amount_minor(dec!(24.17), 5).unwrap(), 12085);
    }

    #[test]
    fn test_sub_cent_prices_round() {
        // 19.995 * 100 = 1999.5 -> rounds away from zero
        assert_eq!(amount_minor(dec!(19.995), 1).unwrap(), 2000);
        assert_eq!(amount_minor(dec!(19.994), 1).unwrap(), 1999);
    }

    #[test]
    fn test_zero_quantity_is_zero() {
        assert_eq!(amount_minor(dec!(80.55), 0).unwrap(), 0);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let result = amount_minor(Decimal::MAX, 2);
        assert!(matches!(result, Err(CatalogError::AmountOverflow { .. })));
    }
}
