//! Artifact writers: tables, text summaries, and charts.

mod charts;
mod summary;
mod tables;

pub use charts::{render_correlogram, render_forecast_chart, render_qq_chart};
pub use summary::{model_summary_text, write_model_summary};
pub use tables::{write_forecast_table, write_ljung_box_table, write_residual_table};
