//! Common utility functions for money arithmetic.
//!
//! This module provides the rounding and formatting shared by every
//! derivation and by the presentation of amounts.

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
/// use split_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(16.204)), dec!(16.20));
/// assert_eq!(round_half_up(dec!(16.205)), dec!(16.21));
/// assert_eq!(round_half_up(dec!(-16.205)), dec!(-16.21)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two decimal places, rounding half-up.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use split_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(dec!(16.2)), "16.20");
/// assert_eq!(format_amount(dec!(108)), "108.00");
/// assert_eq!(format_amount(dec!(0.125)), "0.13");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    // `round_dp` never raises the scale, so pad whole or one-decimal values.
    rounded.rescale(2);
    rounded.to_string()
}
