//! The split calculator: every operation the presentation layer can request.
//!
//! [`SplitCalculator`] owns one [`BillState`] and is the only thing that
//! mutates it. Derived values (subtotal, total after tax) are never stored;
//! they are recomputed from the current fields each time they are read.
//!
//! Any edit to the bill hides a previously shown result, since that result
//! was computed from the values being edited.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculations::{bill, common::format_amount};
use crate::lookup::{LookupError, TaxLookupService};
use crate::models::{BillState, Item, ItemId, SplitPhase, SplitResult};
use crate::parse::{ParseDecimalError, parse_optional_decimal};

#[derive(Debug, Clone, Default)]
pub struct SplitCalculator {
    state: BillState,
}

impl SplitCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BillState {
        &self.state
    }

    pub fn items(&self) -> &[Item] {
        self.state.items()
    }

    pub fn subtotal(&self) -> Decimal {
        self.state.subtotal()
    }

    pub fn total_after_tax(&self) -> Decimal {
        self.state.total_after_tax()
    }

    pub fn phase(&self) -> SplitPhase {
        self.state.phase()
    }

    // ─── items ───────────────────────────────────────────────────────────

    /// Adds an item from raw cost text.
    ///
    /// Empty text is a no-op and returns `Ok(None)`. Text that is not a
    /// number is rejected and the item list is left alone.
    pub fn add_item(
        &mut self,
        cost_text: &str,
    ) -> Result<Option<ItemId>, ParseDecimalError> {
        let Some(cost) = parse_optional_decimal(cost_text)? else {
            return Ok(None);
        };

        let id = self.state.allocate_id();
        self.state.items.push(Item { id, cost });
        self.state.result = None;
        debug!(%id, %cost, subtotal = %self.state.subtotal(), "item added");
        Ok(Some(id))
    }

    /// Removes the item with `id`. Returns `false` (and changes nothing) when
    /// no such item exists.
    pub fn delete_item(
        &mut self,
        id: ItemId,
    ) -> bool {
        let before = self.state.items.len();
        self.state.items.retain(|item| item.id != id);
        let removed = self.state.items.len() != before;

        if removed {
            self.state.result = None;
            debug!(%id, subtotal = %self.state.subtotal(), "item deleted");
        } else {
            debug!(%id, "delete ignored, no such item");
        }
        removed
    }

    // ─── location and tax ────────────────────────────────────────────────

    pub fn set_location(
        &mut self,
        location: &str,
    ) {
        self.state.location = location.trim().to_string();
        self.state.result = None;
    }

    /// Sets the tax rate (a percentage) from raw text. Empty text clears it.
    pub fn set_tax_rate(
        &mut self,
        rate_text: &str,
    ) -> Result<(), ParseDecimalError> {
        let rate = parse_optional_decimal(rate_text)?;
        self.state.tax_rate = rate;
        self.state.result = None;
        debug!(rate = ?rate, total_after_tax = %self.state.total_after_tax(), "tax rate set");
        Ok(())
    }

    /// Applies the outcome of a finished tax lookup.
    ///
    /// A success overwrites the tax rate unconditionally, whichever request
    /// it answers. A failure leaves the bill exactly as it was and is handed
    /// back so the caller can notify the user.
    pub fn apply_tax_lookup(
        &mut self,
        outcome: Result<Decimal, LookupError>,
    ) -> Result<Decimal, LookupError> {
        match outcome {
            Ok(rate) => {
                self.state.tax_rate = Some(rate);
                self.state.result = None;
                info!(%rate, total_after_tax = %self.state.total_after_tax(), "tax rate resolved by lookup");
                Ok(rate)
            }
            Err(error) => {
                warn!(%error, "sales tax lookup failed; keeping previous rate");
                Err(error)
            }
        }
    }

    /// Looks up the sales tax for `city` and applies it.
    pub async fn set_tax_rate_from_lookup(
        &mut self,
        service: &dyn TaxLookupService,
        city: &str,
    ) -> Result<Decimal, LookupError> {
        debug!(city, "looking up sales tax");
        let outcome = service.sales_tax_rate(city).await;
        self.apply_tax_lookup(outcome)
    }

    /// Tax rate as text for an input field; empty when unset.
    pub fn tax_rate_text(&self) -> String {
        self.state
            .tax_rate
            .map(|rate| rate.normalize().to_string())
            .unwrap_or_default()
    }

    // ─── tip ─────────────────────────────────────────────────────────────

    /// Sets the tip amount from raw text. Empty text clears it.
    pub fn set_tip(
        &mut self,
        tip_text: &str,
    ) -> Result<(), ParseDecimalError> {
        let tip = parse_optional_decimal(tip_text)?;
        self.state.tip_amount = tip;
        self.state.result = None;
        debug!(tip = ?tip, "tip set");
        Ok(())
    }

    /// Sets the tip to `percentage` (a fraction, `0.15` for 15%) of the
    /// current total after tax and returns it.
    ///
    /// Uses whatever total is current: if the tax rate has not been set yet
    /// the tip is taken on the untaxed subtotal.
    pub fn set_tip_from_percentage(
        &mut self,
        percentage: Decimal,
    ) -> Decimal {
        let tip = bill::tip_from_percentage(percentage, self.state.total_after_tax());
        self.state.tip_amount = Some(tip);
        self.state.result = None;
        debug!(%percentage, %tip, "tip set from percentage");
        tip
    }

    /// Tip as text with two decimals (e.g. `"16.20"`); empty when unset.
    pub fn tip_text(&self) -> String {
        self.state
            .tip_amount
            .map(format_amount)
            .unwrap_or_default()
    }

    // ─── split ───────────────────────────────────────────────────────────

    /// Computes the split when location, tax rate and tip are all present.
    ///
    /// Otherwise does nothing and returns `None`; the result stays hidden.
    pub fn compute_split(&mut self) -> Option<SplitResult> {
        if self.state.location.is_empty() {
            debug!("split not computed: location missing");
            return None;
        }
        self.state.tax_rate?;
        let tip = self.state.tip_amount?;

        let result = SplitResult {
            amount: bill::split_amount(tip, self.state.total_after_tax()),
        };
        self.state.result = Some(result);
        info!(amount = %result.amount, "split computed");
        Some(result)
    }

    pub fn is_result_shown(&self) -> bool {
        self.state.is_result_shown()
    }

    /// `"Your split is: $<amount>"` while a result is shown.
    pub fn split_message(&self) -> Option<String> {
        self.state.result().map(SplitResult::message)
    }

    /// Hides the result without touching the bill.
    pub fn close_result(&mut self) {
        self.state.result = None;
    }

    /// Returns to the initial empty state.
    pub fn reset_for_new_split(&mut self) {
        self.state = BillState::default();
        info!("new split started");
    }
}
