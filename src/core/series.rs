//! Monthly price series.

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Months, NaiveDate};

/// A named univariate price series observed at month-start dates.
///
/// Invariants enforced at construction: every date is the first day of
/// its month, dates are strictly increasing, and every price is a
/// positive finite number (the modeling pipeline works in log space).
/// Calendar gaps are allowed; they come from dropped missing entries and
/// are never interpolated.
#[derive(Debug, Clone)]
pub struct MonthlySeries {
    name: String,
    months: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl MonthlySeries {
    /// Create a new series, validating the invariants above.
    pub fn new(name: impl Into<String>, months: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if months.len() != values.len() {
            return Err(ForecastError::LengthMismatch {
                months: months.len(),
                values: values.len(),
            });
        }
        if months.is_empty() {
            return Err(ForecastError::EmptySeries);
        }

        for (i, month) in months.iter().enumerate() {
            if month.day() != 1 {
                return Err(ForecastError::NotMonthStart(*month));
            }
            if i > 0 {
                if *month == months[i - 1] {
                    return Err(ForecastError::DuplicateMonth(*month));
                }
                if *month < months[i - 1] {
                    return Err(ForecastError::NonMonotonicMonths {
                        prev: months[i - 1],
                        next: *month,
                    });
                }
            }
            let value = values[i];
            if !value.is_finite() || value <= 0.0 {
                return Err(ForecastError::NonPositivePrice {
                    month: *month,
                    value,
                });
            }
        }

        Ok(Self {
            name: name.into(),
            months,
            values,
        })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Series name (typically derived from the ticker symbol).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Observation dates, all month-starts.
    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    /// Price levels.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Last observed month.
    pub fn last_month(&self) -> NaiveDate {
        self.months[self.months.len() - 1]
    }

    /// Natural log of the price levels.
    pub fn log_values(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.ln()).collect()
    }

    /// True when consecutive observations are exactly one month apart.
    pub fn is_contiguous(&self) -> bool {
        self.months
            .windows(2)
            .all(|w| w[0].checked_add_months(Months::new(1)) == Some(w[1]))
    }

    /// The `horizon` month-start dates immediately following the last
    /// observation: M+1, M+2, ... with no gaps and no overlap.
    pub fn future_months(&self, horizon: usize) -> Result<Vec<NaiveDate>> {
        let last = self.last_month();
        (1..=horizon)
            .map(|h| {
                last.checked_add_months(Months::new(h as u32))
                    .ok_or(ForecastError::HorizonOverflow)
            })
            .collect()
    }
}
