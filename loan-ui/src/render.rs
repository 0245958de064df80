//! Plain-text rendering of the form for a terminal.

use std::fmt::Write as _;

use loan_core::{
    AlertKind, AmortizationSchedule, FormField, FormState, TotalFigure,
    form::{ALERT_CONFIRM_TEXT, ALERT_TITLE},
};
use rust_decimal::Decimal;

/// Formats an amount with exactly two fractional digits.
pub fn format_amount(value: Decimal) -> String {
    format!("{value:.2}")
}

/// The two result cards: installment and the configured total figure.
pub fn render_results(
    state: &FormState,
    figure: TotalFigure,
) -> String {
    let result = state.result();
    format!(
        "{:<16}{:>14}\n{:<16}{:>14}\n",
        "Installment:",
        format_amount(result.installment),
        format!("{}:", figure.label()),
        format_amount(result.total),
    )
}

/// Current field text, one line per field.
pub fn render_fields(state: &FormState) -> String {
    let mut out = String::new();
    for field in FormField::all() {
        let text = state.text(*field);
        let shown = if text.is_empty() { "(empty)" } else { text };
        let _ = writeln!(out, "{:<16}{}", format!("{}:", field.label()), shown);
    }
    out
}

pub fn render_state(
    state: &FormState,
    figure: TotalFigure,
) -> String {
    let mut out = render_fields(state);
    out.push_str(&render_results(state, figure));
    if let Some(kind) = state.alert() {
        out.push_str(&render_alert(kind));
    }
    out
}

/// The blocking alert with its single acknowledgement.
pub fn render_alert(kind: &AlertKind) -> String {
    format!(
        "[{ALERT_TITLE}] {}\n  type 'ok' to continue ({ALERT_CONFIRM_TEXT})\n",
        kind.message(),
    )
}

pub fn render_schedule(schedule: &AmortizationSchedule) -> String {
    let mut out = format!(
        "{:>6} {:>14} {:>14} {:>14} {:>16}\n",
        "Period", "Payment", "Interest", "Principal", "Balance"
    );
    for row in schedule.rows() {
        let _ = writeln!(
            out,
            "{:>6} {:>14} {:>14} {:>14} {:>16}",
            row.period,
            format_amount(row.payment),
            format_amount(row.interest),
            format_amount(row.principal),
            format_amount(row.balance),
        );
    }
    let _ = writeln!(
        out,
        "Total paid {} / interest {}",
        format_amount(schedule.total_paid()),
        format_amount(schedule.total_interest())
    );
    out
}
