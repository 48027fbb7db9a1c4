//! Monthly PHP/JPY ARIMA forecast.
//!
//! Loads the monthly price table, grid-searches ARIMA(p,d,q) orders by
//! AIC, forecasts the next 12 months with a 95% confidence interval,
//! and writes the forecast table, residuals, model summary, and chart
//! to the output directory.
//!
//! Run with: cargo run --bin forecast

use std::path::Path;

use fxcast::data::load_monthly_csv;
use fxcast::models::SearchGrid;
use fxcast::pipeline::{forecast_levels, select_model, write_core_artifacts};
use fxcast::Result;

const DATA_PATH: &str = "data/phpjpy_monthly.csv";
const OUT_DIR: &str = "output";
const TICKER: &str = "PHPJPY=X";
const HORIZON: usize = 12;
const CONFIDENCE: f64 = 0.95;

fn main() -> Result<()> {
    let series = load_monthly_csv(Path::new(DATA_PATH), TICKER)?;
    println!(
        "Loaded {} observations, {} to {}",
        series.len(),
        series.months()[0],
        series.last_month()
    );

    let result = select_model(&series, &SearchGrid::arima_default())?;
    println!(
        "Best order: {} AIC: {:.2} ({} of {} candidates fitted)",
        result.order,
        result.aic,
        result.n_fitted(),
        result.attempts.len()
    );

    let forecast = forecast_levels(&series, &result.model, HORIZON, CONFIDENCE)?;

    let title = format!("PHP/JPY {} forecast ({} months)", result.order, HORIZON);
    let paths = write_core_artifacts(
        Path::new(OUT_DIR),
        &series,
        &result.model,
        &forecast,
        &title,
        "JPY per 1 PHP",
        "",
    )?;

    println!("Saved:");
    for path in paths {
        println!("- {}", path.display());
    }

    Ok(())
}
