//! Form state for the single-screen loan calculator.
//!
//! The screen holds three raw text fields, the last computed
//! [`LoanResult`](crate::LoanResult) and an optional blocking alert. State is
//! an immutable value: every user action is a pure function from the old
//! state to the new one, so the presentation layer only has to hold the
//! latest value and re-render it.
//!
//! | Action          | Effect                                                    |
//! |-----------------|-----------------------------------------------------------|
//! | `edit_field`    | replaces one field's text, nothing else                   |
//! | `calculate`     | validates, parses and computes, or raises an alert        |
//! | `clear`         | empties the fields and zeroes the result, keeps the alert |
//! | `dismiss_alert` | hides the alert, keeps everything else                    |

mod alert;
mod field;
mod parse;
mod state;

pub use alert::{ALERT_CONFIRM_TEXT, ALERT_TITLE, AlertKind, FormPhase};
pub use field::FormField;
pub use parse::{FieldParseError, parse_amount, parse_term};
pub use state::{FormAction, FormState, reduce};
