//! Owner of the single form state for a session.
//!
//! The controller is the only writer. Every action runs to completion
//! through [`reduce`] before subscribers are told about the new state, so a
//! reader always observes the result of the most recent action.

use loan_core::form::reduce;
use loan_core::{
    AmortizationCalculator, AmortizationSchedule, CalculatorError, FormAction, FormField,
    FormState,
};
use tracing::{debug, info};

type Listener = Box<dyn FnMut(&FormState)>;

pub struct FormController {
    state: FormState,
    calculator: AmortizationCalculator,
    listeners: Vec<Listener>,
}

impl FormController {
    pub fn new(calculator: AmortizationCalculator) -> Self {
        Self {
            state: FormState::new(),
            calculator,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn calculator(&self) -> &AmortizationCalculator {
        &self.calculator
    }

    /// Registers a callback run after every completed action.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&FormState) + 'static,
    ) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies `action` and notifies subscribers.
    pub fn dispatch(
        &mut self,
        action: FormAction,
    ) -> &FormState {
        debug!(?action, "dispatching form action");

        let was_alerting = self.state.alert_visible();
        let previous = std::mem::take(&mut self.state);
        self.state = reduce(previous, action, &self.calculator);

        match (was_alerting, self.state.alert()) {
            (false, Some(kind)) => info!(alert = %kind.message(), "alert shown"),
            (true, None) => debug!("alert dismissed"),
            _ => {}
        }

        for listener in &mut self.listeners {
            listener(&self.state);
        }
        &self.state
    }

    /// The `onChange(fieldId, text)` boundary.
    pub fn on_change(
        &mut self,
        field: FormField,
        text: impl Into<String>,
    ) -> &FormState {
        self.dispatch(FormAction::EditField(field, text.into()))
    }

    pub fn calculate(&mut self) -> &FormState {
        self.dispatch(FormAction::Calculate)
    }

    pub fn clear(&mut self) -> &FormState {
        self.dispatch(FormAction::Clear)
    }

    pub fn dismiss_alert(&mut self) -> &FormState {
        self.dispatch(FormAction::DismissAlert)
    }

    /// Schedule for the input behind the current result, or `None` when
    /// nothing has been calculated since start or the last clear.
    pub fn schedule(&self) -> Option<Result<AmortizationSchedule, CalculatorError>> {
        self.state
            .calculated_input()
            .map(|input| AmortizationSchedule::build(&self.calculator, input))
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(AmortizationCalculator::default())
    }
}
