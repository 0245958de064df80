//! Period-by-period amortization schedule.
//!
//! Each period pays the rounded installment. Interest accrues on the opening
//! balance at the monthly rate and is rounded to cents; the remainder of the
//! payment reduces the balance. Because the installment itself is rounded,
//! the last period is adjusted to pay off exactly what is left, so the
//! closing balance is always `0.00`.
//!
//! The opening balance is the principal rounded half-up to cents, so a
//! principal with more than two fractional digits amortizes its rounded
//! amount: the principal column sums to `round_half_up(principal)`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use loan_core::{AmortizationCalculator, AmortizationSchedule, LoanInput};
//!
//! let input = LoanInput::new(dec!(1000.00), 12, dec!(12));
//! let schedule = AmortizationSchedule::build(&AmortizationCalculator::default(), &input).unwrap();
//!
//! assert_eq!(schedule.rows().len(), 12);
//! assert_eq!(schedule.rows()[0].interest, dec!(10.00));
//! assert_eq!(schedule.rows()[11].balance, dec!(0.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::LoanInput;
use crate::calculations::amortization::{AmortizationCalculator, CalculatorError};
use crate::calculations::common::round_half_up;

/// Longest schedule that will be listed (100 years of monthly payments).
pub const MAX_SCHEDULE_PERIODS: u32 = 1200;

/// One installment of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based installment number.
    pub period: u32,
    /// Amount paid this period.
    pub payment: Decimal,
    /// Interest portion of the payment.
    pub interest: Decimal,
    /// Principal portion of the payment.
    pub principal: Decimal,
    /// Balance left after the payment.
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    rows: Vec<ScheduleRow>,
    total_interest: Decimal,
    total_paid: Decimal,
}

impl AmortizationSchedule {
    /// Builds the schedule for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError`] if the installment cannot be computed or
    /// if the term exceeds [`MAX_SCHEDULE_PERIODS`].
    pub fn build(
        calculator: &AmortizationCalculator,
        input: &LoanInput,
    ) -> Result<Self, CalculatorError> {
        if input.term_months > MAX_SCHEDULE_PERIODS {
            return Err(CalculatorError::ScheduleTooLong {
                requested: input.term_months,
                max: MAX_SCHEDULE_PERIODS,
            });
        }

        let installment = calculator.compute_installment(input)?;
        let rate = input.monthly_rate();

        let mut rows = Vec::with_capacity(input.term_months as usize);
        let mut balance = round_half_up(input.principal);
        let mut total_interest = Decimal::ZERO;
        let mut total_paid = Decimal::ZERO;

        for period in 1..=input.term_months {
            let interest = round_half_up(balance * rate);
            let last = period == input.term_months;

            let (payment, principal) = if last || installment - interest > balance {
                (balance + interest, balance)
            } else {
                (installment, installment - interest)
            };

            balance -= principal;
            total_interest += interest;
            total_paid += payment;

            rows.push(ScheduleRow {
                period,
                payment,
                interest,
                principal,
                balance,
            });
        }

        Ok(Self {
            rows,
            total_interest: round_half_up(total_interest),
            total_paid: round_half_up(total_paid),
        })
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    /// Sum of the interest portions.
    pub fn total_interest(&self) -> Decimal {
        self.total_interest
    }

    /// Sum of all payments.
    pub fn total_paid(&self) -> Decimal {
        self.total_paid
    }
}
