//! Forecast result structure.

use chrono::NaiveDate;

use crate::error::{ForecastError, Result};

/// One forecasted month: point estimate bracketed by a confidence
/// interval, all in price-level space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastStep {
    pub month: NaiveDate,
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Point forecasts with confidence intervals in log space, as produced
/// by a fitted model before back-transformation.
#[derive(Debug, Clone)]
pub struct LogForecast {
    pub point: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl LogForecast {
    pub fn horizon(&self) -> usize {
        self.point.len()
    }
}

/// A dated forecast in price-level space.
#[derive(Debug, Clone)]
pub struct Forecast {
    steps: Vec<ForecastStep>,
}

impl Forecast {
    /// Back-transform a log-space forecast onto the given future months.
    ///
    /// Exponentiation is applied to both interval bounds independently;
    /// as a monotone transform it preserves lower <= upper.
    pub fn from_log(months: Vec<NaiveDate>, log: &LogForecast) -> Result<Self> {
        if months.len() != log.point.len()
            || log.lower.len() != log.point.len()
            || log.upper.len() != log.point.len()
        {
            return Err(ForecastError::LengthMismatch {
                months: months.len(),
                values: log.point.len(),
            });
        }

        let steps = months
            .into_iter()
            .enumerate()
            .map(|(i, month)| ForecastStep {
                month,
                point: log.point[i].exp(),
                lower: log.lower[i].exp(),
                upper: log.upper[i].exp(),
            })
            .collect();

        Ok(Self { steps })
    }

    /// Number of forecasted months.
    pub fn horizon(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[ForecastStep] {
        &self.steps
    }

    pub fn months(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.steps.iter().map(|s| s.month)
    }

    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        self.steps.iter().map(|s| s.point)
    }
}
