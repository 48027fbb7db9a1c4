//! Core data structures for the forecasting pipeline.

mod forecast;
mod series;

pub use forecast::{Forecast, ForecastStep, LogForecast};
pub use series::MonthlySeries;
