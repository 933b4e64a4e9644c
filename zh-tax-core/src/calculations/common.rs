//! Shared arithmetic helpers.
//!
//! Centime rounding, the floor applied to taxable amounts, and the
//! floor-and-ceiling clamp used by the percentage deductions.

use rust_decimal::Decimal;

/// Rounds an amount to centimes, with midpoints going away from zero.
///
/// Applied once per tax component, after its Steuerfuss. The bracket
/// evaluators themselves stay unrounded so the multipliers work on the
/// exact base.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use zh_tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(5862.364)), dec!(5862.36));
/// assert_eq!(round_half_up(dec!(5862.365)), dec!(5862.37));
/// assert_eq!(round_half_up(dec!(-658.025)), dec!(-658.03));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two amounts.
///
/// Mostly used as `max(ZERO, gross - deductions)`: deductions can exceed
/// income, taxable income never goes negative.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use zh_tax_core::calculations::common::max;
///
/// assert_eq!(max(Decimal::ZERO, dec!(97500) - dec!(15200)), dec!(82300));
/// assert_eq!(max(Decimal::ZERO, dec!(5000) - dec!(15200)), Decimal::ZERO);
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Restricts a value to the inclusive range `[lower, upper]`.
///
/// Used for the percentage-with-floor-and-ceiling deductions (professional
/// expenses, side income expenses).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use zh_tax_core::calculations::common::clamp;
///
/// assert_eq!(clamp(dec!(1500.00), dec!(2000.00), dec!(4000.00)), dec!(2000.00));
/// assert_eq!(clamp(dec!(3000.00), dec!(2000.00), dec!(4000.00)), dec!(3000.00));
/// assert_eq!(clamp(dec!(5000.00), dec!(2000.00), dec!(4000.00)), dec!(4000.00));
/// ```
pub fn clamp(
    value: Decimal,
    lower: Decimal,
    upper: Decimal,
) -> Decimal {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}
