//! The single aggregate behind a split.
//!
//! Only the user-entered fields are stored. `subtotal` and `total_after_tax`
//! are recomputed from those fields on every call, so they can never lag
//! behind an edit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Item, ItemId, SplitResult};
use crate::calculations::bill;

/// Where a split currently stands.
///
/// Purely descriptive: any field may be edited in any phase, and the phase
/// is derived from whatever is filled in right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPhase {
    Idle,
    Accumulating,
    TaxResolved,
    TipSet,
    SplitComputed,
}

impl SplitPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "No items",
            Self::Accumulating => "Adding items",
            Self::TaxResolved => "Tax set",
            Self::TipSet => "Tip set",
            Self::SplitComputed => "Split ready",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillState {
    pub(crate) items: Vec<Item>,
    pub(crate) location: String,
    /// Sales tax as a percentage (`8.5` means 8.5%).
    pub(crate) tax_rate: Option<Decimal>,
    pub(crate) tip_amount: Option<Decimal>,
    pub(crate) result: Option<SplitResult>,
    next_id: u64,
}

impl Default for BillState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            location: String::new(),
            tax_rate: None,
            tip_amount: None,
            result: None,
            next_id: 1,
        }
    }
}

impl BillState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn tax_rate(&self) -> Option<Decimal> {
        self.tax_rate
    }

    pub fn tip_amount(&self) -> Option<Decimal> {
        self.tip_amount
    }

    pub fn result(&self) -> Option<&SplitResult> {
        self.result.as_ref()
    }

    pub fn is_result_shown(&self) -> bool {
        self.result.is_some()
    }

    pub fn subtotal(&self) -> Decimal {
        bill::subtotal(&self.items)
    }

    pub fn total_after_tax(&self) -> Decimal {
        bill::total_after_tax(self.subtotal(), self.tax_rate)
    }

    pub fn phase(&self) -> SplitPhase {
        if self.result.is_some() {
            SplitPhase::SplitComputed
        } else if self.tip_amount.is_some() {
            SplitPhase::TipSet
        } else if self.tax_rate.is_some() {
            SplitPhase::TaxResolved
        } else if !self.items.is_empty() {
            SplitPhase::Accumulating
        } else {
            SplitPhase::Idle
        }
    }

    /// Hands out the next item id. Never repeats until the state is reset.
    pub(crate) fn allocate_id(&mut self) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_state_is_idle_and_empty() {
        let state = BillState::new();

        assert!(state.items().is_empty());
        assert_eq!(state.location(), "");
        assert_eq!(state.tax_rate(), None);
        assert_eq!(state.tip_amount(), None);
        assert!(!state.is_result_shown());
        assert_eq!(state.subtotal(), Decimal::ZERO);
        assert_eq!(state.phase(), SplitPhase::Idle);
    }

    #[test]
    fn allocate_id_is_monotonic() {
        let mut state = BillState::new();

        assert_eq!(state.allocate_id(), ItemId::new(1));
        assert_eq!(state.allocate_id(), ItemId::new(2));
        assert_eq!(state.allocate_id(), ItemId::new(3));
    }

    #[test]
    fn total_after_tax_tracks_tax_rate_without_staleness() {
        let mut state = BillState::new();
        let id = state.allocate_id();
        state.items.push(Item {
            id,
            cost: dec!(100),
        });

        state.tax_rate = Some(dec!(8));
        assert_eq!(state.total_after_tax(), dec!(108));

        state.tax_rate = None;
        assert_eq!(state.total_after_tax(), dec!(100));
    }

    #[test]
    fn phase_follows_filled_fields() {
        let mut state = BillState::new();
        let id = state.allocate_id();
        state.items.push(Item {
            id,
            cost: dec!(10),
        });
        assert_eq!(state.phase(), SplitPhase::Accumulating);

        state.tax_rate = Some(dec!(8));
        assert_eq!(state.phase(), SplitPhase::TaxResolved);

        state.tip_amount = Some(dec!(1.62));
        assert_eq!(state.phase(), SplitPhase::TipSet);

        state.result = Some(SplitResult {
            amount: dec!(12.42),
        });
        assert_eq!(state.phase(), SplitPhase::SplitComputed);
    }
}
