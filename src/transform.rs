//! Log-space transform used to stabilize the variance of price series.

use crate::error::{ForecastError, Result};

/// Natural-log transform. Every value must be strictly positive.
pub fn log_transform(values: &[f64]) -> Result<Vec<f64>> {
    for &v in values {
        if !v.is_finite() || v <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "log transform requires positive values, got {v}"
            )));
        }
    }
    Ok(values.iter().map(|v| v.ln()).collect())
}

/// Inverse of [`log_transform`]: exponentiate back to levels.
pub fn exp_transform(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.exp()).collect()
}
