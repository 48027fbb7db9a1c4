//! Error types for the fxcast pipeline.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while loading data, fitting models, or writing
/// artifacts.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Underlying I/O failure (missing input file, unwritable output dir).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited input.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Input table had no rows with a parseable date index.
    #[error("no parseable date rows in {path}")]
    NoParseableDates { path: String },

    /// Input series is empty.
    #[error("empty input series")]
    EmptySeries,

    /// Two observations for the same calendar month.
    #[error("duplicate month in series: {0}")]
    DuplicateMonth(NaiveDate),

    /// Dates go backwards.
    #[error("months must be strictly increasing: {prev} then {next}")]
    NonMonotonicMonths { prev: NaiveDate, next: NaiveDate },

    /// A date that is not the first day of its month.
    #[error("not a month-start date: {0}")]
    NotMonthStart(NaiveDate),

    /// Prices must be positive for the log transform.
    #[error("non-positive price {value} at {month}")]
    NonPositivePrice { month: NaiveDate, value: f64 },

    /// Parallel month/value vectors of different length.
    #[error("length mismatch: {months} months, {values} values")]
    LengthMismatch { months: usize, values: usize },

    /// Too few observations for the requested model order.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before forecasting")]
    FitRequired,

    /// Every candidate in the grid search failed to fit.
    #[error("no model could be fit: all {attempted} candidates failed")]
    NoModelFit { attempted: usize },

    /// Month arithmetic overflowed while building the forecast index.
    #[error("forecast horizon overflows the calendar")]
    HorizonOverflow,

    /// Chart rendering failure.
    #[error("chart error: {0}")]
    Chart(String),
}
