use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::format_amount;

/// Outcome of a computed split: tip plus total after tax.
///
/// The amount is not divided by a party size; it is the single total the
/// user owes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResult {
    pub amount: Decimal,
}

impl SplitResult {
    /// The user-facing message, e.g. `"Your split is: $124.20"`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SplitResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Your split is: ${}", format_amount(self.amount))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn message_formats_two_decimals() {
        let result = SplitResult {
            amount: dec!(124.2),
        };

        assert_eq!(result.message(), "Your split is: $124.20");
    }

    #[test]
    fn message_rounds_half_up() {
        let result = SplitResult {
            amount: dec!(10.005),
        };

        assert_eq!(result.message(), "Your split is: $10.01");
    }
}
