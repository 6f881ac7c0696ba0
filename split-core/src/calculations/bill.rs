//! Derivations from the entered items to the final split.
//!
//! | Step | Value |
//! |------|-------|
//! | 1 | Subtotal: sum of item costs |
//! | 2 | Total after tax: subtotal + subtotal × rate / 100 |
//! | 3 | Tip (from a percentage press): percentage × total after tax, rounded |
//! | 4 | Split: tip + total after tax |
//!
//! Arithmetic saturates rather than panicking on overflow, so absurd input
//! yields an absurd number instead of a crash.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use split_core::calculations::bill;
//! use split_core::{Item, ItemId};
//!
//! let items = vec![
//!     Item { id: ItemId::new(1), cost: dec!(60.00) },
//!     Item { id: ItemId::new(2), cost: dec!(40.00) },
//! ];
//!
//! let subtotal = bill::subtotal(&items);
//! let total = bill::total_after_tax(subtotal, Some(dec!(8)));
//! let tip = bill::tip_from_percentage(dec!(0.15), total);
//!
//! assert_eq!(total, dec!(108));
//! assert_eq!(tip, dec!(16.20));
//! assert_eq!(bill::split_amount(tip, total), dec!(124.20));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::common::round_half_up;
use crate::models::Item;

/// Sum of all item costs. An empty list sums to zero.
pub fn subtotal(items: &[Item]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.cost))
}

/// Applies a percentage sales tax to `subtotal`.
///
/// With no tax rate the total is the subtotal itself.
pub fn total_after_tax(
    subtotal: Decimal,
    tax_rate: Option<Decimal>,
) -> Decimal {
    match tax_rate {
        Some(rate) => {
            let tax = subtotal.saturating_mul(rate / Decimal::ONE_HUNDRED);
            let total = subtotal.saturating_add(tax);
            trace!(%subtotal, %rate, %total, "applied sales tax");
            total
        }
        None => subtotal,
    }
}

/// Tip for a percentage press, where `percentage` is a fraction
/// (`0.15` for 15%). Rounded half-up to cents.
pub fn tip_from_percentage(
    percentage: Decimal,
    total_after_tax: Decimal,
) -> Decimal {
    round_half_up(percentage.saturating_mul(total_after_tax))
}

/// The amount owed: tip plus total after tax.
pub fn split_amount(
    tip_amount: Decimal,
    total_after_tax: Decimal,
) -> Decimal {
    tip_amount.saturating_add(total_after_tax)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::ItemId;

    fn items(costs: &[Decimal]) -> Vec<Item> {
        costs
            .iter()
            .enumerate()
            .map(|(i, cost)| Item {
                id: ItemId::new(i as u64 + 1),
                cost: *cost,
            })
            .collect()
    }

    // =========================================================================
    // subtotal tests
    // =========================================================================

    #[test]
    fn subtotal_of_empty_list_is_zero() {
        assert_eq!(subtotal(&[]), Decimal::ZERO);
    }

    #[test]
    fn subtotal_sums_costs() {
        let result = subtotal(&items(&[dec!(12.50), dec!(7.25), dec!(0.25)]));

        assert_eq!(result, dec!(20.00));
    }

    #[test]
    fn subtotal_has_no_binary_float_drift() {
        let result = subtotal(&items(&[dec!(0.1), dec!(0.2)]));

        assert_eq!(result, dec!(0.3));
    }

    #[test]
    fn subtotal_saturates_instead_of_panicking() {
        let result = subtotal(&items(&[Decimal::MAX, Decimal::MAX]));

        assert_eq!(result, Decimal::MAX);
    }

    // =========================================================================
    // total_after_tax tests
    // =========================================================================

    #[test]
    fn total_after_tax_applies_whole_percentage() {
        let result = total_after_tax(dec!(100), Some(dec!(8)));

        assert_eq!(result, dec!(108.00));
    }

    #[test]
    fn total_after_tax_applies_fractional_percentage() {
        let result = total_after_tax(dec!(100), Some(dec!(9.5)));

        assert_eq!(result, dec!(109.5));
    }

    #[test]
    fn total_after_tax_without_rate_is_subtotal() {
        let result = total_after_tax(dec!(42.10), None);

        assert_eq!(result, dec!(42.10));
    }

    #[test]
    fn total_after_tax_with_zero_rate_is_subtotal() {
        let result = total_after_tax(dec!(42.10), Some(Decimal::ZERO));

        assert_eq!(result, dec!(42.10));
    }

    // =========================================================================
    // tip_from_percentage tests
    // =========================================================================

    #[test]
    fn tip_from_percentage_fifteen_percent() {
        let result = tip_from_percentage(dec!(0.15), dec!(108.00));

        assert_eq!(result, dec!(16.20));
    }

    #[test]
    fn tip_from_percentage_rounds_to_cents() {
        // 0.15 × 33.33 = 4.9995
        let result = tip_from_percentage(dec!(0.15), dec!(33.33));

        assert_eq!(result, dec!(5.00));
    }

    #[test]
    fn tip_from_percentage_on_zero_total_is_zero() {
        let result = tip_from_percentage(dec!(0.2), Decimal::ZERO);

        assert_eq!(result, Decimal::ZERO);
    }

    // =========================================================================
    // split_amount tests
    // =========================================================================

    #[test]
    fn split_amount_adds_tip_to_total() {
        let result = split_amount(dec!(16.20), dec!(108.00));

        assert_eq!(result, dec!(124.20));
    }
}
