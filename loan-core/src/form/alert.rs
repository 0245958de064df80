use crate::CalculatorError;
use crate::form::FormField;

/// Heading shown on every alert.
pub const ALERT_TITLE: &str = "Alert";

/// Label of the single acknowledgement action.
pub const ALERT_CONFIRM_TEXT: &str = "OK";

/// Whether the form is accepting input or blocked by an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    AlertShown,
}

/// Reason a `calculate` action was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertKind {
    /// At least one field was empty.
    MissingInput,
    /// A field held text that is not a number of the right kind.
    InvalidNumber(FormField),
    /// The numbers parsed but describe a loan the calculator rejects.
    InvalidLoan(CalculatorError),
}

impl AlertKind {
    pub fn message(&self) -> String {
        match self {
            Self::MissingInput => "Enter the data".to_string(),
            Self::InvalidNumber(FormField::Term) => {
                format!("{} must be a whole number", FormField::Term.label())
            }
            Self::InvalidNumber(field) => format!("{} must be a valid number", field.label()),
            Self::InvalidLoan(error) => {
                let text = error.to_string();
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => text,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_input_message() {
        assert_eq!(AlertKind::MissingInput.message(), "Enter the data");
    }

    #[test]
    fn invalid_number_names_the_field() {
        assert_eq!(
            AlertKind::InvalidNumber(FormField::Principal).message(),
            "Loan amount must be a valid number"
        );
        assert_eq!(
            AlertKind::InvalidNumber(FormField::Term).message(),
            "Installments must be a whole number"
        );
    }

    #[test]
    fn invalid_loan_capitalizes_error() {
        assert_eq!(
            AlertKind::InvalidLoan(CalculatorError::ZeroTerm).message(),
            "Number of installments must be at least 1"
        );
    }
}
