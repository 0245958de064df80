//! Level-payment (annuity) calculations for a fixed-rate, fixed-term loan.
//!
//! With monthly rate `i = annual_rate_percent / 12 / 100` and `n` monthly
//! installments, the installment is
//!
//! ```text
//! payment = principal × i × (1 + i)^n / ((1 + i)^n − 1)
//! ```
//!
//! rounded half-up to two decimal places. A zero rate amortizes linearly
//! (`principal / n`), which is also the limit of the formula as `i → 0`.
//! When `(1 + i)^n` is too large for a [`Decimal`] the installment is the
//! interest-only limit `principal × i`.
//!
//! Derived figures:
//!
//! | Figure        | Definition                                   |
//! |---------------|----------------------------------------------|
//! | total repaid  | `n × installment`, rounded                   |
//! | total interest| `total repaid − principal`, rounded          |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use loan_core::{AmortizationCalculator, LoanInput, TotalFigure};
//!
//! let calculator = AmortizationCalculator::new(TotalFigure::Repaid);
//! let input = LoanInput::new(dec!(1000.00), 12, dec!(12.0));
//!
//! let result = calculator.calculate(&input).unwrap();
//!
//! assert_eq!(result.installment, dec!(88.85));
//! assert_eq!(result.total, dec!(1066.20));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{checked_pow, round_half_up};
use crate::{LoanInput, LoanResult, TotalFigure};

/// Errors that can occur while computing loan figures.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CalculatorError {
    /// The principal must be zero or positive.
    #[error("principal must not be negative, got {0}")]
    NegativePrincipal(Decimal),

    /// The loan must have at least one installment.
    #[error("number of installments must be at least 1")]
    ZeroTerm,

    /// The annual rate must be zero or positive.
    #[error("annual rate must not be negative, got {0}")]
    NegativeRate(Decimal),

    /// An intermediate value did not fit in a decimal.
    #[error("loan figures are too large to compute")]
    Overflow,

    /// A schedule was requested for more periods than are listed.
    #[error("schedule is limited to {max} periods, got {requested}")]
    ScheduleTooLong { requested: u32, max: u32 },
}

/// Calculator for installment and term-level loan figures.
///
/// Stateless apart from the choice of which figure fills
/// [`LoanResult::total`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmortizationCalculator {
    total_figure: TotalFigure,
}

impl AmortizationCalculator {
    pub fn new(total_figure: TotalFigure) -> Self {
        Self { total_figure }
    }

    pub fn total_figure(&self) -> TotalFigure {
        self.total_figure
    }

    /// Computes the installment and the configured total figure.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError`] if the input is rejected by
    /// [`validate`](Self::validate) or if an intermediate value overflows.
    pub fn calculate(
        &self,
        input: &LoanInput,
    ) -> Result<LoanResult, CalculatorError> {
        let installment = self.compute_installment(input)?;
        let total = match self.total_figure {
            TotalFigure::Repaid => self.total_repaid(input, installment)?,
            TotalFigure::Installment => installment,
            TotalFigure::Interest => {
                let repaid = self.total_repaid(input, installment)?;
                round_half_up(repaid - input.principal)
            }
        };

        debug!(
            principal = %input.principal,
            term_months = input.term_months,
            annual_rate_percent = %input.annual_rate_percent,
            %installment,
            %total,
            total_figure = %self.total_figure,
            "loan calculated"
        );

        Ok(LoanResult::new(installment, total))
    }

    /// Checks the preconditions of the payment formula.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use loan_core::{AmortizationCalculator, CalculatorError, LoanInput};
    ///
    /// let calculator = AmortizationCalculator::default();
    /// let input = LoanInput::new(dec!(1000), 0, dec!(12));
    ///
    /// assert_eq!(calculator.validate(&input), Err(CalculatorError::ZeroTerm));
    /// ```
    pub fn validate(
        &self,
        input: &LoanInput,
    ) -> Result<(), CalculatorError> {
        if input.principal < Decimal::ZERO {
            warn!(principal = %input.principal, "rejected negative principal");
            return Err(CalculatorError::NegativePrincipal(input.principal));
        }
        if input.term_months == 0 {
            warn!("rejected zero-installment loan");
            return Err(CalculatorError::ZeroTerm);
        }
        if input.annual_rate_percent < Decimal::ZERO {
            warn!(rate = %input.annual_rate_percent, "rejected negative rate");
            return Err(CalculatorError::NegativeRate(input.annual_rate_percent));
        }
        Ok(())
    }

    /// Computes the level monthly installment, rounded half-up to cents.
    pub fn compute_installment(
        &self,
        input: &LoanInput,
    ) -> Result<Decimal, CalculatorError> {
        self.validate(input)?;

        let rate = input.monthly_rate();
        if rate.is_zero() {
            return self.linear_installment(input);
        }

        // (1 + i)^n past the decimal range: the annuity factor is 1 to well
        // beyond 28 significant digits, so the payment is interest only.
        let Some(growth) = checked_pow(Decimal::ONE + rate, input.term_months) else {
            debug!(term = input.term_months, "growth factor out of range, using interest-only limit");
            return input
                .principal
                .checked_mul(rate)
                .map(round_half_up)
                .ok_or(CalculatorError::Overflow);
        };
        let denominator = growth - Decimal::ONE;
        if denominator.is_zero() {
            // Rate too small to register in (1 + i)^n; the annuity has
            // degenerated to its linear limit.
            return self.linear_installment(input);
        }

        // Divide before scaling by the principal so large growth factors
        // never meet the principal in one product.
        let payment = growth
            .checked_div(denominator)
            .and_then(|factor| factor.checked_mul(rate))
            .and_then(|v| v.checked_mul(input.principal))
            .ok_or(CalculatorError::Overflow)?;

        Ok(round_half_up(payment))
    }

    /// Computes `term_months × installment`, rounded half-up.
    pub fn compute_total_repaid(
        &self,
        input: &LoanInput,
    ) -> Result<Decimal, CalculatorError> {
        let installment = self.compute_installment(input)?;
        self.total_repaid(input, installment)
    }

    /// Computes total repaid minus principal, rounded half-up.
    pub fn compute_total_interest(
        &self,
        input: &LoanInput,
    ) -> Result<Decimal, CalculatorError> {
        let repaid = self.compute_total_repaid(input)?;
        Ok(round_half_up(repaid - input.principal))
    }

    /// Computes the figure selected by `figure`, independent of the
    /// calculator's own configuration.
    pub fn compute_total_figure(
        &self,
        input: &LoanInput,
        figure: TotalFigure,
    ) -> Result<Decimal, CalculatorError> {
        AmortizationCalculator::new(figure)
            .calculate(input)
            .map(|result| result.total)
    }

    fn linear_installment(
        &self,
        input: &LoanInput,
    ) -> Result<Decimal, CalculatorError> {
        input
            .principal
            .checked_div(Decimal::from(input.term_months))
            .map(round_half_up)
            .ok_or(CalculatorError::Overflow)
    }

    fn total_repaid(
        &self,
        input: &LoanInput,
        installment: Decimal,
    ) -> Result<Decimal, CalculatorError> {
        installment
            .checked_mul(Decimal::from(input.term_months))
            .map(round_half_up)
            .ok_or(CalculatorError::Overflow)
    }
}
