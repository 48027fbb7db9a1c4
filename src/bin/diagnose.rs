//! Monthly PHP/JPY SARIMA forecast with residual diagnostics.
//!
//! Grid-searches seasonal SARIMA(p,d,q)(P,D,Q)[12] orders by AIC,
//! forecasts 12 months ahead, and writes the four core artifacts plus
//! residual ACF/PACF charts, a Ljung-Box table at lags 12 and 24, and a
//! normal QQ chart.
//!
//! Run with: cargo run --bin diagnose

use std::path::Path;

use fxcast::data::load_monthly_csv;
use fxcast::models::SearchGrid;
use fxcast::pipeline::{
    forecast_levels, select_model, write_core_artifacts, write_diagnostic_artifacts,
};
use fxcast::Result;

const DATA_PATH: &str = "data/phpjpy_monthly.csv";
const OUT_DIR: &str = "output";
const TICKER: &str = "PHPJPY=X";
const HORIZON: usize = 12;
const CONFIDENCE: f64 = 0.95;
const SEASONAL_PERIOD: usize = 12;

fn main() -> Result<()> {
    let series = load_monthly_csv(Path::new(DATA_PATH), TICKER)?;
    println!(
        "Loaded {} observations, {} to {}",
        series.len(),
        series.months()[0],
        series.last_month()
    );

    let result = select_model(&series, &SearchGrid::sarima_default(SEASONAL_PERIOD))?;
    println!(
        "Best order: {} AIC: {:.2} ({} of {} candidates fitted)",
        result.order,
        result.aic,
        result.n_fitted(),
        result.attempts.len()
    );

    let forecast = forecast_levels(&series, &result.model, HORIZON, CONFIDENCE)?;

    let out_dir = Path::new(OUT_DIR);
    let title = format!("PHP/JPY {} forecast ({} months)", result.order, HORIZON);
    let mut paths = write_core_artifacts(
        out_dir,
        &series,
        &result.model,
        &forecast,
        &title,
        "JPY per 1 PHP",
        "sarima_",
    )?;
    paths.extend(write_diagnostic_artifacts(out_dir, &result.model)?);

    println!("Saved:");
    for path in paths {
        println!("- {}", path.display());
    }

    Ok(())
}
