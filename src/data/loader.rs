//! CSV loader for monthly price tables.
//!
//! Accepts the two shapes the market-data export produces: a plain
//! single header row (`Date,price`), or a two-row header where one row
//! carries the ticker symbol for each column. Rows are aligned to exact
//! month-start dates; anything else (mid-month dates, blank or
//! non-numeric cells) is dropped rather than interpolated.

use std::path::Path;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::core::MonthlySeries;
use crate::error::{ForecastError, Result};

/// Parse a date cell, accepting a bare date or a date-time.
fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Pick the value column: the column whose header cell matches the
/// ticker in any header row, falling back to the first data column.
fn value_column(headers: &[StringRecord], ticker: &str) -> usize {
    for header in headers {
        for (idx, cell) in header.iter().enumerate() {
            if idx > 0 && cell.trim() == ticker {
                return idx;
            }
        }
    }
    1
}

/// Derive a series name from a ticker symbol (`PHPJPY=X` -> `phpjpy`).
fn series_name(ticker: &str) -> String {
    ticker.trim_end_matches("=X").to_ascii_lowercase()
}

/// Load a monthly price series from a delimited table file.
///
/// Fails fast on a missing file, an empty table, or a table with no
/// parseable date rows; the modeling stages never see bad input.
pub fn load_monthly_csv(path: &Path, ticker: &str) -> Result<MonthlySeries> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }

    if records.is_empty() {
        return Err(ForecastError::NoParseableDates {
            path: path.display().to_string(),
        });
    }

    // Header shape detection: if the second row's first cell is not a
    // date, the table has a two-row header.
    let header_rows = if records.len() > 1
        && parse_date(records[1].get(0).unwrap_or_default()).is_none()
    {
        2
    } else {
        1
    };

    let col = value_column(&records[..header_rows.min(records.len())], ticker);

    let mut months = Vec::new();
    let mut values = Vec::new();
    for record in &records[header_rows.min(records.len())..] {
        let Some(date) = record.get(0).and_then(parse_date) else {
            continue;
        };
        // Month-start alignment: off-grid dates are dropped, not shifted.
        if date.day() != 1 {
            continue;
        }
        let Some(value) = record
            .get(col)
            .and_then(|cell| cell.trim().parse::<f64>().ok())
        else {
            continue;
        };
        if !value.is_finite() {
            continue;
        }
        months.push(date);
        values.push(value);
    }

    if months.is_empty() {
        return Err(ForecastError::NoParseableDates {
            path: path.display().to_string(),
        });
    }

    MonthlySeries::new(series_name(ticker), months, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TICKER: &str = "PHPJPY=X";

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_single_header_table() {
        let file = write_csv(
            "Date,phpjpy\n\
             2020-01-01,2.10\n\
             2020-02-01,2.15\n\
             2020-03-01,2.12\n",
        );
        let series = load_monthly_csv(file.path(), TICKER).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.name(), "phpjpy");
        assert_eq!(series.values()[1], 2.15);
    }

    #[test]
    fn loads_two_row_header_and_selects_ticker_column() {
        let file = write_csv(
            "Ticker,OTHER=X,PHPJPY=X\n\
             Date,,\n\
             2020-01-01,9.99,2.10\n\
             2020-02-01,9.99,2.15\n",
        );
        let series = load_monthly_csv(file.path(), TICKER).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), &[2.10, 2.15]);
    }

    #[test]
    fn two_row_header_falls_back_to_first_data_column() {
        let file = write_csv(
            "Ticker,EURUSD=X\n\
             Date,\n\
             2020-01-01,1.10\n\
             2020-02-01,1.12\n",
        );
        let series = load_monthly_csv(file.path(), TICKER).unwrap();
        assert_eq!(series.values(), &[1.10, 1.12]);
    }

    #[test]
    fn drops_off_grid_dates_and_blank_cells() {
        let file = write_csv(
            "Date,phpjpy\n\
             2020-01-01,2.10\n\
             2020-01-15,9.99\n\
             2020-02-01,\n\
             2020-03-01,2.12\n",
        );
        let series = load_monthly_csv(file.path(), TICKER).unwrap();
        // mid-month row and blank-value row both dropped; gap stays a gap
        assert_eq!(series.len(), 2);
        assert_eq!(series.months()[1].month(), 3);
    }

    #[test]
    fn accepts_datetime_formatted_index() {
        let file = write_csv(
            "Date,phpjpy\n\
             2020-01-01 00:00:00,2.10\n\
             2020-02-01 00:00:00,2.15\n",
        );
        let series = load_monthly_csv(file.path(), TICKER).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_monthly_csv(Path::new("does/not/exist.csv"), TICKER);
        assert!(matches!(result, Err(ForecastError::Csv(_))));
    }

    #[test]
    fn empty_file_has_no_parseable_dates() {
        let file = write_csv("");
        let result = load_monthly_csv(file.path(), TICKER);
        assert!(matches!(
            result,
            Err(ForecastError::NoParseableDates { .. })
        ));
    }

    #[test]
    fn header_only_file_has_no_parseable_dates() {
        let file = write_csv("Date,phpjpy\n");
        let result = load_monthly_csv(file.path(), TICKER);
        assert!(matches!(
            result,
            Err(ForecastError::NoParseableDates { .. })
        ));
    }

    #[test]
    fn duplicate_months_are_a_data_error() {
        let file = write_csv(
            "Date,phpjpy\n\
             2020-01-01,2.10\n\
             2020-01-01,2.11\n",
        );
        let result = load_monthly_csv(file.path(), TICKER);
        assert!(matches!(result, Err(ForecastError::DuplicateMonth(_))));
    }
}
