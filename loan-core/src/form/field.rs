use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three text inputs on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Principal,
    Term,
    Rate,
}

impl FormField {
    /// Fields in display order.
    pub fn all() -> &'static [FormField] {
        &[FormField::Principal, FormField::Term, FormField::Rate]
    }

    /// Stable identifier used by the `onChange(fieldId, text)` boundary.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Principal => "principal",
            Self::Term => "term",
            Self::Rate => "rate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Principal => "Loan amount",
            Self::Term => "Installments",
            Self::Rate => "Annual rate (%)",
        }
    }

    /// Looks a field up by id. Matching ignores case and surrounding
    /// whitespace so `"Term"` and `"term"` address the same field.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|field| field.id().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for FormField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_id() {
        for field in FormField::all() {
            assert_eq!(FormField::parse(field.id()), Some(*field));
        }
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!(FormField::parse("Term"), Some(FormField::Term));
        assert_eq!(FormField::parse(" RATE "), Some(FormField::Rate));
    }

    #[test]
    fn parse_rejects_unknown_id() {
        assert_eq!(FormField::parse("cuotas"), None);
    }
}
