//! CSV export of an amortization schedule.
//!
//! ```csv
//! period,payment,interest,principal,balance
//! 1,88.85,10.00,78.85,921.15
//! 2,88.85,9.21,79.64,841.51
//! ```

use std::{fs::File, io::Write, path::Path};

use loan_core::AmortizationSchedule;
use tracing::debug;

/// Errors that can occur while writing a schedule.
#[derive(Debug, thiserror::Error)]
pub enum CsvExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("schedule text is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Writes the header and one record per period to `writer`.
pub fn write_schedule<W: Write>(
    writer: W,
    schedule: &AmortizationSchedule,
) -> Result<(), CsvExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in schedule.rows() {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the schedule to it.
pub fn write_to_file(
    path: &Path,
    schedule: &AmortizationSchedule,
) -> Result<(), CsvExportError> {
    let file = File::create(path)?;
    write_schedule(file, schedule)?;
    debug!(path = %path.display(), rows = schedule.rows().len(), "schedule exported");
    Ok(())
}

pub fn to_csv_string(schedule: &AmortizationSchedule) -> Result<String, CsvExportError> {
    let mut buffer = Vec::new();
    write_schedule(&mut buffer, schedule)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use loan_core::{AmortizationCalculator, LoanInput};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn schedule() -> AmortizationSchedule {
        AmortizationSchedule::build(
            &AmortizationCalculator::default(),
            &LoanInput::new(dec!(1000), 12, dec!(12)),
        )
        .unwrap()
    }

    #[test]
    fn writes_header_and_first_rows() {
        let text = to_csv_string(&schedule()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "period,payment,interest,principal,balance");
        assert_eq!(lines[1], "1,88.85,10.00,78.85,921.15");
        assert_eq!(lines[2], "2,88.85,9.21,79.64,841.51");
    }

    #[test]
    fn writes_one_line_per_period() {
        let text = to_csv_string(&schedule()).unwrap();

        assert_eq!(text.lines().count(), 13);
        assert!(text.lines().last().unwrap().ends_with(",0.00"));
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let result = write_to_file(Path::new("/no/such/dir/schedule.csv"), &schedule());

        assert!(matches!(result, Err(CsvExportError::Io(_))));
    }
}
