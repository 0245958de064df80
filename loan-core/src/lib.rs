pub mod calculations;
pub mod form;
pub mod models;

pub use calculations::{AmortizationCalculator, AmortizationSchedule, CalculatorError};
pub use form::{AlertKind, FormAction, FormField, FormPhase, FormState};
pub use models::*;
