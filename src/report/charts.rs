//! Raster chart rendering with plotters.

use std::path::Path;

use chrono::NaiveDate;
use plotters::prelude::*;

use crate::core::{Forecast, MonthlySeries};
use crate::diagnostics::{qq_points, reference_line};
use crate::error::{ForecastError, Result};

/// Fixed output resolution for every chart.
const CHART_SIZE: (u32, u32) = (1280, 800);

fn chart_err<E: std::fmt::Display>(e: E) -> ForecastError {
    ForecastError::Chart(e.to_string())
}

/// Render the forecast chart: observed history, forecast path, and a
/// shaded confidence band.
pub fn render_forecast_chart(
    path: &Path,
    series: &MonthlySeries,
    forecast: &Forecast,
    title: &str,
    y_label: &str,
) -> Result<()> {
    if forecast.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "cannot chart an empty forecast".to_string(),
        ));
    }

    let x_start = series.months()[0];
    let x_end = forecast.steps()[forecast.horizon() - 1].month;

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &v in series.values() {
        y_min = y_min.min(v);
        y_max = y_max.max(v);
    }
    for step in forecast.steps() {
        y_min = y_min.min(step.lower);
        y_max = y_max.max(step.upper);
    }
    let pad = (y_max - y_min).max(1e-6) * 0.05;
    let y_range = (y_min - pad)..(y_max + pad);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_start..x_end, y_range)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(y_label)
        .draw()
        .map_err(chart_err)?;

    // Confidence band: upper path forward, lower path back.
    let band: Vec<(NaiveDate, f64)> = forecast
        .steps()
        .iter()
        .map(|s| (s.month, s.upper))
        .chain(forecast.steps().iter().rev().map(|s| (s.month, s.lower)))
        .collect();
    chart
        .draw_series(std::iter::once(Polygon::new(band, BLUE.mix(0.2).filled())))
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            series
                .months()
                .iter()
                .zip(series.values())
                .map(|(m, v)| (*m, *v)),
            &BLACK,
        ))
        .map_err(chart_err)?
        .label("observed")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], &BLACK));

    chart
        .draw_series(LineSeries::new(
            forecast.steps().iter().map(|s| (s.month, s.point)),
            &RED,
        ))
        .map_err(chart_err)?
        .label("forecast")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], &RED));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.85))
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Render a correlogram (ACF or PACF) as a stem chart with the
/// white-noise significance band.
pub fn render_correlogram(path: &Path, values: &[f64], band: f64, title: &str) -> Result<()> {
    if values.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "cannot chart an empty correlogram".to_string(),
        ));
    }

    let max_lag = values.len() - 1;
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(-0.5..(max_lag as f64 + 0.5), -1.1..1.1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Lag")
        .draw()
        .map_err(chart_err)?;

    if band.is_finite() {
        for bound in [band, -band] {
            chart
                .draw_series(LineSeries::new(
                    [(-0.5, bound), (max_lag as f64 + 0.5, bound)],
                    &BLUE.mix(0.5),
                ))
                .map_err(chart_err)?;
        }
    }

    chart
        .draw_series(values.iter().enumerate().filter(|(_, v)| v.is_finite()).map(
            |(lag, &value)| {
                Rectangle::new(
                    [(lag as f64 - 0.15, 0.0), (lag as f64 + 0.15, value)],
                    BLACK.filled(),
                )
            },
        ))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Render a normal QQ chart of the residuals with a moment-fitted
/// reference line.
pub fn render_qq_chart(path: &Path, residuals: &[f64], title: &str) -> Result<()> {
    let points = qq_points(residuals);
    if points.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "cannot chart an empty QQ plot".to_string(),
        ));
    }

    let x_min = points[0].theoretical;
    let x_max = points[points.len() - 1].theoretical;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in &points {
        y_min = y_min.min(p.sample);
        y_max = y_max.max(p.sample);
    }
    let x_pad = (x_max - x_min).max(1e-6) * 0.05;
    let y_pad = (y_max - y_min).max(1e-6) * 0.05;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(
            (x_min - x_pad)..(x_max + x_pad),
            (y_min - y_pad)..(y_max + y_pad),
        )
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Theoretical quantiles")
        .y_desc("Sample quantiles")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            [
                (x_min, reference_line(residuals, x_min)),
                (x_max, reference_line(residuals, x_max)),
            ],
            &RED,
        ))
        .map_err(chart_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.theoretical, p.sample), 3, BLUE.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}
