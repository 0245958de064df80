use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Percent-per-year to fraction-per-month divisor (12 months × 100 percent).
const MONTHLY_RATE_DIVISOR: Decimal = Decimal::from_parts(1200, 0, 0, false, 0);

/// Parameters of a fixed-rate, fixed-term loan.
///
/// Built fresh for every calculation request and never stored beyond the
/// result it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed.
    pub principal: Decimal,
    /// Number of monthly installments.
    pub term_months: u32,
    /// Nominal annual interest rate in percent (`12` means 12 %).
    pub annual_rate_percent: Decimal,
}

impl LoanInput {
    pub fn new(
        principal: Decimal,
        term_months: u32,
        annual_rate_percent: Decimal,
    ) -> Self {
        Self {
            principal,
            term_months,
            annual_rate_percent,
        }
    }

    /// Periodic rate as a fraction: `annual_rate_percent / 12 / 100`.
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_percent / MONTHLY_RATE_DIVISOR
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn monthly_rate_divides_by_twelve_and_one_hundred() {
        let input = LoanInput::new(dec!(1000), 12, dec!(12));

        assert_eq!(input.monthly_rate(), dec!(0.01));
    }

    #[test]
    fn monthly_rate_is_zero_for_zero_rate() {
        let input = LoanInput::new(dec!(1000), 12, Decimal::ZERO);

        assert_eq!(input.monthly_rate(), Decimal::ZERO);
    }
}
