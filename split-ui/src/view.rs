use std::fmt;

use split_core::calculations::format_amount;

use crate::session::Session;

/// Text rendering of the bill screen.
pub struct BillView<'a> {
    session: &'a Session,
}

impl<'a> BillView<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

impl fmt::Display for BillView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let calc = self.session.calculator();
        let state = calc.state();

        writeln!(f, "── MySplit ─────────────────────────────")?;
        writeln!(f, "Items:")?;
        if state.items().is_empty() {
            writeln!(f, "  (none)")?;
        }
        for item in state.items() {
            writeln!(f, "  #{:<4} Item Cost: ${}", item.id, format_amount(item.cost))?;
        }
        writeln!(f, "Subtotal:        ${}", format_amount(calc.subtotal()))?;
        writeln!(f, "Sales Tax:       {}", or_dash(&calc.tax_rate_text()))?;
        writeln!(f, "City:            {}", or_dash(state.location()))?;
        if state.tax_rate().is_some() {
            writeln!(f, "Total After Tax: ${}", format_amount(calc.total_after_tax()))?;
        }
        writeln!(
            f,
            "Tip:             {}   [{}]",
            or_dash(&calc.tip_text()),
            self.session.preset_labels().join("] [")
        )?;

        write!(f, "Status:          {}", calc.phase().label())?;
        match self.session.pending_lookups() {
            0 => writeln!(f)?,
            n => writeln!(f, " (looking up sales tax, {n} pending)")?,
        }

        if let Some(message) = calc.split_message() {
            writeln!(f, "┌──────────────────────────────────────┐")?;
            writeln!(f, "  {message}")?;
            writeln!(f, "  `close` to go back, `new` for a new split")?;
            writeln!(f, "└──────────────────────────────────────┘")?;
        }

        if let Some(alert) = self.session.alert() {
            writeln!(f, "! {alert}")?;
        }
        Ok(())
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "—" } else { value }
}
