//! Common utility functions for tax calculations.
//!
//! This module provides shared arithmetic used across the derivation steps:
//! rounding, clamping, and the proportional exemption split. Every helper is
//! total: overflow saturates and division by zero yields zero.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps negative values to zero.
pub fn floor_at_zero(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// The amount by which `value` exceeds `base`, or zero if it does not.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::excess_over;
///
/// assert_eq!(excess_over(dec!(150), dec!(100)), dec!(50));
/// assert_eq!(excess_over(dec!(80), dec!(100)), dec!(0));
/// ```
pub fn excess_over(
    value: Decimal,
    base: Decimal,
) -> Decimal {
    if value > base {
        value.saturating_sub(base)
    } else {
        Decimal::ZERO
    }
}

/// `part / whole`, or zero unless `whole` is positive.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::ratio;
///
/// assert_eq!(ratio(dec!(15), dec!(60)), dec!(0.25));
/// assert_eq!(ratio(dec!(15), dec!(0)), dec!(0));
/// ```
pub fn ratio(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole > Decimal::ZERO {
        part.checked_div(whole).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// Splits `amount` into `(exempt, taxable)` by the export ratio.
///
/// The taxable part is always `amount - exempt`, so the two parts add back
/// to `amount` exactly.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::proportional_split;
///
/// assert_eq!(
///     proportional_split(dec!(1000), dec!(0.25)),
///     (dec!(250), dec!(750))
/// );
/// ```
pub fn proportional_split(
    amount: Decimal,
    ratio: Decimal,
) -> (Decimal, Decimal) {
    let exempt = amount.saturating_mul(ratio);
    (exempt, amount.saturating_sub(exempt))
}
