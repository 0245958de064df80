//! Common numeric helpers for loan calculations.
//!
//! Currency amounts are rounded once, at the edge of each figure, using
//! half-up rounding to two decimal places. Powers are taken with checked
//! arithmetic so that oversized terms surface as an error instead of a panic.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero, matching the
/// convention used for displayed currency.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use loan_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(88.8487886783)), dec!(88.85));
/// assert_eq!(round_half_up(dec!(10.005)), dec!(10.01));
/// assert_eq!(round_half_up(dec!(10.004)), dec!(10.00));
/// assert_eq!(round_half_up(dec!(-10.005)), dec!(-10.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Raises `base` to the integer power `exp` by repeated squaring.
///
/// Returns `None` when an intermediate product does not fit in a [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use loan_core::calculations::common::checked_pow;
///
/// assert_eq!(checked_pow(dec!(1.01), 2), Some(dec!(1.0201)));
/// assert_eq!(checked_pow(dec!(7), 0), Some(dec!(1)));
/// assert_eq!(checked_pow(dec!(10), 40), None);
/// ```
pub fn checked_pow(
    base: Decimal,
    exp: u32,
) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut factor = base;
    let mut remaining = exp;

    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result.checked_mul(factor)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            factor = factor.checked_mul(factor)?;
        }
    }

    Some(result)
}
