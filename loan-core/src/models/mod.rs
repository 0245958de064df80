mod loan_input;
mod loan_result;
mod total_figure;

pub use loan_input::LoanInput;
pub use loan_result::LoanResult;
pub use total_figure::{ParseTotalFigureError, TotalFigure};
