//! Presentation state for one run of the calculator.
//!
//! The [`Session`] sits between typed commands and the [`SplitCalculator`]:
//! it forwards each request, turns rejected input and failed lookups into a
//! one-shot alert, and tracks lookups still in flight. It never blocks; a
//! lookup is handed back to the caller as [`Action::Lookup`] and its outcome
//! comes back later through [`Session::apply_lookup`].

use rust_decimal::Decimal;
use split_core::{LookupError, SplitCalculator};
use tracing::{debug, warn};

use crate::{command::Command, logging};

/// What the event loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Redraw the bill.
    Render,
    /// Print the command list.
    Help,
    /// Start a sales-tax lookup for this city, then redraw.
    Lookup(String),
    Quit,
}

#[derive(Debug, Clone)]
pub struct Session {
    calculator: SplitCalculator,
    tip_presets: Vec<Decimal>,
    alert: Option<String>,
    pending_lookups: usize,
}

impl Session {
    pub fn new(tip_presets: Vec<Decimal>) -> Self {
        Self {
            calculator: SplitCalculator::new(),
            tip_presets,
            alert: None,
            pending_lookups: 0,
        }
    }

    pub fn calculator(&self) -> &SplitCalculator {
        &self.calculator
    }

    pub fn tip_presets(&self) -> &[Decimal] {
        &self.tip_presets
    }

    pub fn pending_lookups(&self) -> usize {
        self.pending_lookups
    }

    /// The alert waiting to be shown, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Removes and returns the pending alert; each alert is shown once.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn notify(
        &mut self,
        message: impl Into<String>,
    ) {
        self.alert = Some(message.into());
    }

    pub fn handle(
        &mut self,
        command: Command,
    ) -> Action {
        debug!(?command, "handling command");
        match command {
            Command::AddItem(text) => {
                if let Err(e) = self.calculator.add_item(&text) {
                    self.notify(format!("'{}' is not a valid cost.", e.input()));
                }
            }
            Command::DeleteItem(id) => {
                self.calculator.delete_item(id);
            }
            Command::SetLocation(city) => self.calculator.set_location(&city),
            Command::SetTaxRate(text) => {
                if let Err(e) = self.calculator.set_tax_rate(&text) {
                    self.notify(format!("'{}' is not a valid tax rate.", e.input()));
                }
            }
            Command::LookupTax => {
                self.pending_lookups += 1;
                return Action::Lookup(self.calculator.state().location().to_string());
            }
            Command::SetTip(text) => {
                if let Err(e) = self.calculator.set_tip(&text) {
                    self.notify(format!("'{}' is not a valid tip.", e.input()));
                }
            }
            Command::TipPreset(fraction) => {
                if self.tip_presets.contains(&fraction) {
                    self.calculator.set_tip_from_percentage(fraction);
                } else {
                    self.notify(format!(
                        "No {}% tip button; choose one of {}.",
                        percent_label(fraction),
                        self.preset_labels().join(", ")
                    ));
                }
            }
            Command::ComputeSplit => {
                self.calculator.compute_split();
            }
            Command::CloseResult => self.calculator.close_result(),
            Command::NewSplit => self.calculator.reset_for_new_split(),
            Command::Show => {}
            Command::Help => return Action::Help,
            Command::LogLevel(level) => {
                if let Err(e) = logging::set_log_level(&level) {
                    self.notify(e.to_string());
                }
            }
            Command::LogFile(path) => match path {
                Some(path) => {
                    if let Err(e) = logging::enable_file_logging(&path) {
                        self.notify(e.to_string());
                    }
                }
                None => logging::disable_file_logging(),
            },
            Command::Quit => return Action::Quit,
        }
        Action::Render
    }

    /// Applies a lookup outcome as it arrives. Outcomes are applied in
    /// arrival order; a late answer to an older request still overwrites.
    pub fn apply_lookup(
        &mut self,
        outcome: Result<Decimal, LookupError>,
    ) {
        self.pending_lookups = self.pending_lookups.saturating_sub(1);
        if let Err(e) = self.calculator.apply_tax_lookup(outcome) {
            warn!(error = %e, "showing lookup failure to user");
            self.notify(e.user_message());
        }
    }

    /// Button captions for the configured tip presets, e.g. `["10%", "15%"]`.
    pub fn preset_labels(&self) -> Vec<String> {
        self.tip_presets
            .iter()
            .map(|p| format!("{}%", percent_label(*p)))
            .collect()
    }
}

fn percent_label(fraction: Decimal) -> String {
    (fraction * Decimal::ONE_HUNDRED).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn session() -> Session {
        Session::new(vec![dec!(0.10), dec!(0.15), dec!(0.20)])
    }

    fn run(
        session: &mut Session,
        lines: &[&str],
    ) {
        for line in lines {
            let command = Command::parse(line).unwrap();
            session.handle(command);
        }
    }

    #[test]
    fn full_flow_produces_split_message() {
        let mut s = session();

        run(
            &mut s,
            &["add 60", "add 40", "city Los Angeles", "tax 8", "tip% 15", "split"],
        );

        assert_eq!(s.calculator().tip_text(), "16.20");
        assert_eq!(
            s.calculator().split_message().as_deref(),
            Some("Your split is: $124.20")
        );
    }

    #[test]
    fn split_with_missing_tip_stays_hidden_without_alert() {
        let mut s = session();

        run(&mut s, &["add 10", "city Fresno", "tax 8", "split"]);

        assert!(!s.calculator().is_result_shown());
        assert_eq!(s.alert(), None);
    }

    #[test]
    fn invalid_cost_raises_alert_once() {
        let mut s = session();

        run(&mut s, &["add ten"]);

        assert_eq!(s.take_alert().as_deref(), Some("'ten' is not a valid cost."));
        assert_eq!(s.take_alert(), None);
        assert!(s.calculator().items().is_empty());
    }

    #[test]
    fn unknown_preset_is_refused() {
        let mut s = session();
        run(&mut s, &["add 100"]);

        run(&mut s, &["tip% 12"]);

        assert_eq!(
            s.alert(),
            Some("No 12% tip button; choose one of 10%, 15%, 20%.")
        );
        assert_eq!(s.calculator().state().tip_amount(), None);
    }

    #[test]
    fn lookup_uses_current_city_and_counts_pending() {
        let mut s = session();
        run(&mut s, &["city San Diego"]);

        let action = s.handle(Command::LookupTax);

        assert_eq!(action, Action::Lookup("San Diego".to_string()));
        assert_eq!(s.pending_lookups(), 1);

        s.apply_lookup(Ok(dec!(7.75)));

        assert_eq!(s.pending_lookups(), 0);
        assert_eq!(s.calculator().tax_rate_text(), "7.75");
    }

    #[test]
    fn failed_lookup_alerts_and_keeps_rate() {
        let mut s = session();
        run(&mut s, &["add 100", "tax 8"]);
        s.handle(Command::LookupTax);

        s.apply_lookup(Err(LookupError::Network("connection refused".to_string())));

        assert_eq!(s.alert(), Some("Failed to retrieve sales tax."));
        assert_eq!(s.calculator().total_after_tax(), dec!(108));
    }

    #[test]
    fn new_split_clears_everything() {
        let mut s = session();
        run(
            &mut s,
            &["add 100", "city Fresno", "tax 8", "tip 5", "split", "new"],
        );

        let state = s.calculator().state();
        assert!(state.items().is_empty());
        assert_eq!(state.location(), "");
        assert_eq!(state.tax_rate(), None);
        assert_eq!(state.tip_amount(), None);
        assert!(!state.is_result_shown());
    }

    #[test]
    fn help_and_quit_are_passed_to_the_loop() {
        let mut s = session();

        assert_eq!(s.handle(Command::Help), Action::Help);
        assert_eq!(s.handle(Command::Quit), Action::Quit);
    }

    #[test]
    fn preset_labels_are_whole_percentages() {
        assert_eq!(session().preset_labels(), vec!["10%", "15%", "20%"]);
    }
}
