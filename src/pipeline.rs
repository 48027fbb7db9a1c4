//! The end-to-end analysis pipeline:
//! loader -> model selector -> forecaster -> reporter.
//!
//! Each stage is a plain function so the runnable binaries can report
//! progress between steps, the way the original analysis scripts do.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::core::{Forecast, MonthlySeries};
use crate::diagnostics::{acf, ljung_box, pacf, significance_band};
use crate::error::{ForecastError, Result};
use crate::models::{select_best, Sarima, SearchGrid, SearchResult};
use crate::report::{
    render_correlogram, render_forecast_chart, render_qq_chart, write_forecast_table,
    write_ljung_box_table, write_model_summary, write_residual_table,
};
use crate::transform::log_transform;

/// Number of lags shown in the residual correlograms.
const CORRELOGRAM_LAGS: usize = 24;

/// Grid-search the best model for the series on the log scale.
pub fn select_model(series: &MonthlySeries, grid: &SearchGrid) -> Result<SearchResult> {
    let y = log_transform(series.values())?;
    select_best(&y, grid)
}

/// Forecast `horizon` months past the end of the series, back-transformed
/// to price levels.
pub fn forecast_levels(
    series: &MonthlySeries,
    model: &Sarima,
    horizon: usize,
    level: f64,
) -> Result<Forecast> {
    let log_forecast = model.forecast(horizon, level)?;
    let months = series.future_months(horizon)?;
    Forecast::from_log(months, &log_forecast)
}

/// Pair the model's log-space residuals with their observation months.
pub fn residual_series(series: &MonthlySeries, model: &Sarima) -> Vec<(NaiveDate, f64)> {
    let Some(residuals) = model.residuals() else {
        return vec![];
    };
    let offset = model.residual_offset();
    residuals
        .iter()
        .enumerate()
        .map(|(t, &value)| (series.months()[offset + t], value))
        .collect()
}

/// Number of mean-equation coefficients behind the residuals, for the
/// Ljung-Box degrees-of-freedom adjustment.
fn fitted_params(model: &Sarima) -> usize {
    model.order().num_params() - 1
}

/// Write the four core artifacts: forecast table, residual table, model
/// summary, forecast chart. Returns the paths written.
///
/// The output directory is created if absent; failure to create it is
/// fatal, never silently skipped.
pub fn write_core_artifacts(
    out_dir: &Path,
    series: &MonthlySeries,
    model: &Sarima,
    forecast: &Forecast,
    chart_title: &str,
    y_label: &str,
    prefix: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let horizon = forecast.horizon();
    let forecast_path = out_dir.join(format!("{prefix}forecast_{horizon}m.csv"));
    let residuals_path = out_dir.join(format!("{prefix}residuals.csv"));
    let summary_path = out_dir.join(format!("{prefix}model_summary.txt"));
    let chart_path = out_dir.join(format!("{prefix}forecast_{horizon}m.png"));

    write_forecast_table(&forecast_path, forecast)?;
    write_residual_table(&residuals_path, &residual_series(series, model))?;

    let lb = model
        .residuals()
        .map(|residuals| ljung_box(residuals, 12, fitted_params(model)));
    write_model_summary(&summary_path, model, lb.as_ref())?;

    render_forecast_chart(&chart_path, series, forecast, chart_title, y_label)?;

    Ok(vec![forecast_path, residuals_path, summary_path, chart_path])
}

/// Write the four diagnostic artifacts: residual ACF and PACF charts,
/// the Ljung-Box table at lags 12 and 24, and a normal QQ chart.
pub fn write_diagnostic_artifacts(out_dir: &Path, model: &Sarima) -> Result<Vec<PathBuf>> {
    let residuals = model.residuals().ok_or(ForecastError::FitRequired)?;
    fs::create_dir_all(out_dir)?;

    let acf_path = out_dir.join("diag_resid_acf.png");
    let pacf_path = out_dir.join("diag_resid_pacf.png");
    let lb_path = out_dir.join("diag_ljungbox.csv");
    let qq_path = out_dir.join("diag_resid_qq.png");

    let band = significance_band(residuals.len());
    render_correlogram(
        &acf_path,
        &acf(residuals, CORRELOGRAM_LAGS),
        band,
        "Residuals ACF",
    )?;
    render_correlogram(
        &pacf_path,
        &pacf(residuals, CORRELOGRAM_LAGS),
        band,
        "Residuals PACF",
    )?;

    let params = fitted_params(model);
    write_ljung_box_table(
        &lb_path,
        &[
            ljung_box(residuals, 12, params),
            ljung_box(residuals, 24, params),
        ],
    )?;

    render_qq_chart(&qq_path, residuals, "Residuals QQ Plot")?;

    Ok(vec![acf_path, pacf_path, lb_path, qq_path])
}
