use tracing::debug;

use crate::form::{AlertKind, FormField, FormPhase, parse_amount, parse_term};
use crate::{AmortizationCalculator, LoanInput, LoanResult};

/// A user action on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    EditField(FormField, String),
    Calculate,
    Clear,
    DismissAlert,
}

/// Snapshot of the calculator screen.
///
/// Fields are private; the only way to obtain a different state is through
/// the reducer methods, each of which consumes `self` and returns the
/// successor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    principal_text: String,
    term_text: String,
    rate_text: String,
    result: LoanResult,
    /// Input that produced `result`; `None` until the first successful
    /// calculation and after `clear`.
    calculated: Option<LoanInput>,
    alert: Option<AlertKind>,
}

impl FormState {
    /// Initial state: empty fields, zero result, no alert.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(
        &self,
        field: FormField,
    ) -> &str {
        match field {
            FormField::Principal => &self.principal_text,
            FormField::Term => &self.term_text,
            FormField::Rate => &self.rate_text,
        }
    }

    pub fn result(&self) -> &LoanResult {
        &self.result
    }

    /// Input behind the current result, if any.
    pub fn calculated_input(&self) -> Option<&LoanInput> {
        self.calculated.as_ref()
    }

    pub fn alert(&self) -> Option<&AlertKind> {
        self.alert.as_ref()
    }

    pub fn alert_visible(&self) -> bool {
        self.alert.is_some()
    }

    pub fn phase(&self) -> FormPhase {
        if self.alert_visible() {
            FormPhase::AlertShown
        } else {
            FormPhase::Idle
        }
    }

    /// Replaces the raw text of one field. Does not validate, recompute
    /// or touch the alert.
    pub fn edit_field(
        mut self,
        field: FormField,
        value: impl Into<String>,
    ) -> Self {
        let value = value.into();
        match field {
            FormField::Principal => self.principal_text = value,
            FormField::Term => self.term_text = value,
            FormField::Rate => self.rate_text = value,
        }
        self
    }

    /// Validates and parses the three fields and stores the computed result.
    ///
    /// On any failure the alert is raised with the reason and the previous
    /// result is kept. A successful calculation leaves the alert as it was.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use loan_core::{AmortizationCalculator, FormField, FormState};
    ///
    /// let state = FormState::new()
    ///     .edit_field(FormField::Principal, "1000")
    ///     .edit_field(FormField::Term, "12")
    ///     .edit_field(FormField::Rate, "12")
    ///     .calculate(&AmortizationCalculator::default());
    ///
    /// assert_eq!(state.result().installment, dec!(88.85));
    /// assert!(!state.alert_visible());
    /// ```
    pub fn calculate(
        mut self,
        calculator: &AmortizationCalculator,
    ) -> Self {
        let outcome = self.parse_input().and_then(|input| {
            calculator
                .calculate(&input)
                .map(|result| (input, result))
                .map_err(AlertKind::InvalidLoan)
        });

        match outcome {
            Ok((input, result)) => {
                self.result = result;
                self.calculated = Some(input);
            }
            Err(kind) => {
                debug!(?kind, "calculate refused");
                self.alert = Some(kind);
            }
        }
        self
    }

    /// Empties the three fields and zeroes the result. The alert is left
    /// as it was.
    pub fn clear(self) -> Self {
        Self {
            alert: self.alert,
            ..Self::default()
        }
    }

    /// Hides the alert without touching fields or result.
    pub fn dismiss_alert(mut self) -> Self {
        self.alert = None;
        self
    }

    /// Checks emptiness of every field before parsing any of them.
    fn parse_input(&self) -> Result<LoanInput, AlertKind> {
        if FormField::all()
            .iter()
            .any(|field| self.text(*field).trim().is_empty())
        {
            return Err(AlertKind::MissingInput);
        }

        let principal = parse_amount(FormField::Principal, &self.principal_text)
            .map_err(|e| AlertKind::InvalidNumber(e.field))?;
        let term_months =
            parse_term(&self.term_text).map_err(|e| AlertKind::InvalidNumber(e.field))?;
        let annual_rate_percent = parse_amount(FormField::Rate, &self.rate_text)
            .map_err(|e| AlertKind::InvalidNumber(e.field))?;

        Ok(LoanInput::new(principal, term_months, annual_rate_percent))
    }
}

/// Applies `action` to `state` and returns the successor state.
pub fn reduce(
    state: FormState,
    action: FormAction,
    calculator: &AmortizationCalculator,
) -> FormState {
    match action {
        FormAction::EditField(field, value) => state.edit_field(field, value),
        FormAction::Calculate => state.calculate(calculator),
        FormAction::Clear => state.clear(),
        FormAction::DismissAlert => state.dismiss_alert(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{CalculatorError, TotalFigure};

    fn filled(
        principal: &str,
        term: &str,
        rate: &str,
    ) -> FormState {
        FormState::new()
            .edit_field(FormField::Principal, principal)
            .edit_field(FormField::Term, term)
            .edit_field(FormField::Rate, rate)
    }

    fn calculator() -> AmortizationCalculator {
        AmortizationCalculator::new(TotalFigure::Repaid)
    }

    // =========================================================================
    // initial state tests
    // =========================================================================

    #[test]
    fn new_state_is_idle_and_empty() {
        let state = FormState::new();

        assert_eq!(state.phase(), FormPhase::Idle);
        for field in FormField::all() {
            assert_eq!(state.text(*field), "");
        }
        assert_eq!(*state.result(), LoanResult::default());
        assert!(state.calculated_input().is_none());
    }

    // =========================================================================
    // edit_field tests
    // =========================================================================

    #[test]
    fn edit_field_updates_only_that_field() {
        let state = FormState::new().edit_field(FormField::Term, "24");

        assert_eq!(state.text(FormField::Term), "24");
        assert_eq!(state.text(FormField::Principal), "");
        assert_eq!(state.text(FormField::Rate), "");
    }

    #[test]
    fn edit_field_does_not_recompute_result() {
        let state = filled("1000", "12", "12").calculate(&calculator());

        let state = state.edit_field(FormField::Principal, "5000");

        assert_eq!(state.result().installment, dec!(88.85));
    }

    #[test]
    fn edit_field_keeps_alert() {
        let state = FormState::new().calculate(&calculator());

        let state = state.edit_field(FormField::Rate, "5");

        assert!(state.alert_visible());
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_stores_result() {
        let state = filled("1000.00", "12", "12.0").calculate(&calculator());

        assert_eq!(*state.result(), LoanResult::new(dec!(88.85), dec!(1066.20)));
        assert_eq!(state.phase(), FormPhase::Idle);
        assert_eq!(
            state.calculated_input(),
            Some(&LoanInput::new(dec!(1000.00), 12, dec!(12.0)))
        );
    }

    #[test]
    fn calculate_twice_is_idempotent() {
        let once = filled("25000", "60", "6").calculate(&calculator());
        let twice = once.clone().calculate(&calculator());

        assert_eq!(once, twice);
    }

    #[test]
    fn calculate_with_empty_field_raises_missing_input() {
        for field in FormField::all() {
            let state = filled("1000", "12", "12")
                .edit_field(*field, "")
                .calculate(&calculator());

            assert_eq!(state.alert(), Some(&AlertKind::MissingInput), "{field:?}");
            assert_eq!(state.phase(), FormPhase::AlertShown);
        }
    }

    #[test]
    fn calculate_treats_whitespace_as_empty() {
        let state = filled("1000", "   ", "12").calculate(&calculator());

        assert_eq!(state.alert(), Some(&AlertKind::MissingInput));
    }

    #[test]
    fn calculate_with_empty_field_keeps_previous_result() {
        let state = filled("1000", "12", "12").calculate(&calculator());

        let state = state
            .edit_field(FormField::Rate, "")
            .calculate(&calculator());

        assert_eq!(*state.result(), LoanResult::new(dec!(88.85), dec!(1066.20)));
    }

    #[test]
    fn calculate_first_call_missing_input_keeps_zero_result() {
        let state = FormState::new().calculate(&calculator());

        assert_eq!(state.result().installment.to_string(), "0.00");
        assert_eq!(state.result().total.to_string(), "0.00");
    }

    #[test]
    fn calculate_missing_input_wins_over_invalid_number() {
        let state = filled("abc", "", "12").calculate(&calculator());

        assert_eq!(state.alert(), Some(&AlertKind::MissingInput));
    }

    #[test]
    fn calculate_reports_non_numeric_field() {
        let state = filled("1000", "twelve", "12").calculate(&calculator());

        assert_eq!(state.alert(), Some(&AlertKind::InvalidNumber(FormField::Term)));
        assert_eq!(*state.result(), LoanResult::default());
    }

    #[test]
    fn calculate_reports_decimal_comma_rate() {
        let state = filled("1000", "12", "12,5").calculate(&calculator());

        assert_eq!(state.alert(), Some(&AlertKind::InvalidNumber(FormField::Rate)));
        assert_eq!(state.calculated_input(), None);
    }

    #[test]
    fn calculate_reports_rejected_loan() {
        let state = filled("1000", "0", "12").calculate(&calculator());

        assert_eq!(
            state.alert(),
            Some(&AlertKind::InvalidLoan(CalculatorError::ZeroTerm))
        );
    }

    #[test]
    fn calculate_accepts_zero_rate() {
        let state = filled("1,200", "12", "0").calculate(&calculator());

        assert_eq!(*state.result(), LoanResult::new(dec!(100.00), dec!(1200.00)));
        assert!(!state.alert_visible());
    }

    #[test]
    fn calculate_uses_configured_total_figure() {
        let state = filled("1000", "12", "12")
            .calculate(&AmortizationCalculator::new(TotalFigure::Installment));

        assert_eq!(*state.result(), LoanResult::new(dec!(88.85), dec!(88.85)));
    }

    // =========================================================================
    // clear tests
    // =========================================================================

    #[test]
    fn clear_resets_fields_and_result() {
        let state = filled("1000", "12", "12").calculate(&calculator()).clear();

        for field in FormField::all() {
            assert_eq!(state.text(*field), "");
        }
        assert_eq!(state.result().installment.to_string(), "0.00");
        assert_eq!(state.result().total.to_string(), "0.00");
        assert!(state.calculated_input().is_none());
    }

    #[test]
    fn clear_does_not_touch_alert() {
        let state = FormState::new().calculate(&calculator()).clear();

        assert!(state.alert_visible());
    }

    // =========================================================================
    // dismiss_alert tests
    // =========================================================================

    #[test]
    fn dismiss_alert_returns_to_idle_without_touching_fields() {
        let state = filled("1000", "", "12").calculate(&calculator());
        assert_eq!(state.phase(), FormPhase::AlertShown);

        let state = state.dismiss_alert();

        assert_eq!(state.phase(), FormPhase::Idle);
        assert_eq!(state.text(FormField::Principal), "1000");
        assert_eq!(state.text(FormField::Term), "");
        assert_eq!(state.text(FormField::Rate), "12");
    }

    #[test]
    fn dismiss_alert_when_idle_is_a_no_op() {
        let state = filled("1000", "12", "12");

        assert_eq!(state.clone().dismiss_alert(), state);
    }

    // =========================================================================
    // reduce tests
    // =========================================================================

    #[test]
    fn reduce_applies_actions_in_order() {
        let calc = calculator();
        let actions = vec![
            FormAction::EditField(FormField::Principal, "1000".to_string()),
            FormAction::Calculate,
            FormAction::DismissAlert,
            FormAction::EditField(FormField::Term, "12".to_string()),
            FormAction::EditField(FormField::Rate, "12".to_string()),
            FormAction::Calculate,
        ];

        let state = actions
            .into_iter()
            .fold(FormState::new(), |state, action| reduce(state, action, &calc));

        assert_eq!(state.phase(), FormPhase::Idle);
        assert_eq!(state.result().installment, dec!(88.85));
    }

    #[test]
    fn reduce_clear_matches_method() {
        let state = filled("1000", "12", "12");

        assert_eq!(
            reduce(state.clone(), FormAction::Clear, &calculator()),
            state.clear()
        );
    }
}
