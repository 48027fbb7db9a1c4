//! Residual diagnostics: autocorrelation, white-noise testing, and
//! normality checks.

mod acf;
mod ljung_box;
mod qq;

pub use acf::{acf, autocorrelation, pacf, significance_band};
pub use ljung_box::{ljung_box, LjungBoxResult};
pub use qq::{qq_points, reference_line, QqPoint};
