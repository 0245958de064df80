use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a known [`TotalFigure`] name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown total figure '{0}' (expected one of: repaid, installment, interest)")]
pub struct ParseTotalFigureError(pub String);

/// Which figure fills the second display field next to the installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalFigure {
    /// Installment times the number of installments, rounded.
    #[default]
    Repaid,
    /// The installment itself, repeated in the second field.
    Installment,
    /// Total repaid minus principal.
    Interest,
}

impl TotalFigure {
    pub fn all() -> &'static [TotalFigure] {
        &[
            TotalFigure::Repaid,
            TotalFigure::Installment,
            TotalFigure::Interest,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Repaid => "repaid",
            Self::Installment => "installment",
            Self::Interest => "interest",
        }
    }

    /// Card title used when displaying the figure.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Repaid => "Total repaid",
            Self::Installment => "Total",
            Self::Interest => "Total interest",
        }
    }
}

impl fmt::Display for TotalFigure {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TotalFigure {
    type Err = ParseTotalFigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|figure| figure.as_str() == wanted)
            .ok_or_else(|| ParseTotalFigureError(s.to_string()))
    }
}
