use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::form::FormField;

/// Plain decimal number: optional sign, digits either ungrouped or in comma
/// groups of three, and an optional `.` fraction.
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?|\.\d+)$")
        .expect("number pattern is a valid regex")
});

const NUMBER_SHAPE: &str = "expected digits with optional ',' thousands groups and '.' decimals";

/// Error returned when a field's text is not a number of the expected kind.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field} '{input}' is not valid: {reason}")]
pub struct FieldParseError {
    pub field: FormField,
    pub input: String,
    pub reason: String,
}

impl FieldParseError {
    fn new(
        field: FormField,
        input: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            field,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Trims whitespace and removes comma thousands separators.
///
/// Returns `None` unless the text is a plain decimal number whose commas,
/// if any, group the integer digits in threes.
fn normalize_number_input(s: &str) -> Option<String> {
    let trimmed = s.trim();
    NUMBER_PATTERN
        .is_match(trimmed)
        .then(|| trimmed.replace(',', ""))
}

/// Parses a money or percent field into a [`Decimal`].
///
/// Accepts a comma thousands separator (`"1,234.56"`). A comma anywhere
/// else (`"12,5"`), exponents and digit underscores are rejected.
pub fn parse_amount(
    field: FormField,
    s: &str,
) -> Result<Decimal, FieldParseError> {
    let Some(normalized) = normalize_number_input(s) else {
        tracing::warn!(field = field.id(), input = %s, "invalid number: malformed");
        return Err(FieldParseError::new(field, s, NUMBER_SHAPE));
    };
    Decimal::from_str(&normalized).map_err(|e| {
        tracing::warn!(field = field.id(), input = %s, "invalid number: {}", e);
        FieldParseError::new(field, s, e.to_string())
    })
}

/// Parses the installment count. Only whole, non-negative numbers are
/// accepted; separators and fractions are rejected.
pub fn parse_term(s: &str) -> Result<u32, FieldParseError> {
    s.trim().parse::<u32>().map_err(|e| {
        tracing::warn!(field = FormField::Term.id(), input = %s, "invalid term: {}", e);
        FieldParseError::new(FormField::Term, s, e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount(FormField::Principal, "1,234.56"), Ok(dec!(1234.56)));
        assert_eq!(
            parse_amount(FormField::Principal, "1,234,567.89"),
            Ok(dec!(1234567.89))
        );
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount(FormField::Rate, "  12.5  "), Ok(dec!(12.5)));
    }

    #[test]
    fn parse_amount_rejects_text() {
        let result = parse_amount(FormField::Principal, "abc");

        assert_eq!(result.map_err(|e| e.field), Err(FormField::Principal));
    }

    #[test]
    fn parse_amount_accepts_sign() {
        assert_eq!(parse_amount(FormField::Principal, "-1,000"), Ok(dec!(-1000)));
        assert_eq!(parse_amount(FormField::Rate, "12.5"), Ok(dec!(12.5)));
    }

    #[test]
    fn parse_amount_rejects_decimal_comma() {
        for text in ["12,5", "1,5", "1,00"] {
            let err = parse_amount(FormField::Rate, text).unwrap_err();

            assert_eq!(err.field, FormField::Rate, "{text}");
            assert_eq!(err.input, text);
        }
    }

    #[test]
    fn parse_amount_rejects_misplaced_separators() {
        for text in ["1,,000", ",1000", "1,0,0,0", "1000,", "1,000,00", "1,000.5,0"] {
            assert!(parse_amount(FormField::Principal, text).is_err(), "{text}");
        }
    }

    #[test]
    fn parse_amount_rejects_exponent_and_underscore() {
        for text in ["1e3", "1E3", "1_000", "1.5e2"] {
            assert!(parse_amount(FormField::Principal, text).is_err(), "{text}");
        }
    }

    #[test]
    fn parse_amount_rejects_lone_sign_and_dot() {
        for text in ["-", "+", ".", "1.", "--1"] {
            assert!(parse_amount(FormField::Rate, text).is_err(), "{text}");
        }
    }

    #[test]
    fn parse_term_accepts_whole_number() {
        assert_eq!(parse_term(" 36 "), Ok(36));
    }

    #[test]
    fn parse_term_rejects_fraction() {
        assert!(parse_term("12.5").is_err());
    }

    #[test]
    fn parse_term_rejects_negative() {
        let err = parse_term("-12").unwrap_err();

        assert_eq!(err.field, FormField::Term);
        assert_eq!(err.input, "-12");
    }
}
