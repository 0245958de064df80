//! Loan calculation modules.
//!
//! This module provides the annuity payment formula, the figures derived
//! from it, and the period-by-period amortization schedule.

pub mod amortization;
pub mod common;
pub mod schedule;

pub use amortization::{AmortizationCalculator, CalculatorError};
pub use schedule::{AmortizationSchedule, MAX_SCHEDULE_PERIODS, ScheduleRow};
