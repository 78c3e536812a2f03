//! Rounding helpers shared by the valuation steps.

use rust_decimal::Decimal;

/// Rounds a currency amount to two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use deed_core::calculations::common::round_money;
///
/// assert_eq!(round_money(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_money(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_money(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an area to four decimal places, half away from zero.
pub fn round_area(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value`, or zero if it is negative.
///
/// ```
/// use rust_decimal_macros::dec;
/// use deed_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(-5)), dec!(0));
/// assert_eq!(floor_at_zero(dec!(5)), dec!(5));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
