//! # fxcast
//!
//! ARIMA/SARIMA forecasting pipeline for monthly FX price series.
//!
//! The crate implements one linear analysis pipeline: load a monthly
//! price table, select a model by exhaustive AIC grid search over small
//! order ranges, forecast 12 months ahead with confidence intervals
//! (fitted in log space, reported in levels), and write tables, a model
//! summary, and charts to an output directory. The `forecast` and
//! `diagnose` binaries run the non-seasonal and seasonal variants.

pub mod core;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod transform;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, ForecastStep, LogForecast, MonthlySeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{Sarima, SarimaOrder, SearchGrid, SearchResult};
}
