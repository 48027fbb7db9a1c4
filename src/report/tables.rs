//! Delimited output tables, all with six-decimal fixed precision.

use std::path::Path;

use chrono::NaiveDate;

use crate::core::Forecast;
use crate::diagnostics::LjungBoxResult;
use crate::error::Result;

/// Write the forecast table: month, point, lower, upper.
pub fn write_forecast_table(path: &Path, forecast: &Forecast) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["month", "forecast", "lower", "upper"])?;
    for step in forecast.steps() {
        writer.write_record([
            step.month.to_string(),
            format!("{:.6}", step.point),
            format!("{:.6}", step.lower),
            format!("{:.6}", step.upper),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the residual table: month, residual (log scale).
pub fn write_residual_table(path: &Path, residuals: &[(NaiveDate, f64)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["month", "resid"])?;
    for (month, value) in residuals {
        writer.write_record([month.to_string(), format!("{value:.6}")])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the Ljung-Box table: one row per tested lag count.
pub fn write_ljung_box_table(path: &Path, results: &[LjungBoxResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["lags", "statistic", "df", "p_value"])?;
    for result in results {
        writer.write_record([
            result.lags.to_string(),
            format!("{:.6}", result.statistic),
            result.df.to_string(),
            format!("{:.6}", result.p_value),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
