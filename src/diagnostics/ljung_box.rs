//! Ljung-Box test for residual autocorrelation.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::diagnostics::acf::autocorrelation;

/// Ljung-Box test result at one lag count.
#[derive(Debug, Clone)]
pub struct LjungBoxResult {
    /// Test statistic Q.
    pub statistic: f64,
    /// Approximate p-value under the chi-squared null.
    pub p_value: f64,
    /// Number of lags included.
    pub lags: usize,
    /// Degrees of freedom (lags minus fitted parameters, at least 1).
    pub df: usize,
}

impl LjungBoxResult {
    /// True when the null of white-noise residuals is not rejected.
    pub fn is_white_noise(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

/// Chi-squared survival function.
fn chi_squared_sf(x: f64, df: usize) -> f64 {
    if x <= 0.0 || df == 0 {
        return 1.0;
    }
    match ChiSquared::new(df as f64) {
        Ok(dist) => 1.0 - dist.cdf(x),
        Err(_) => f64::NAN,
    }
}

/// Ljung-Box Q statistic over the first `lags` autocorrelations.
///
/// `fitted_params` adjusts the degrees of freedom for parameters the
/// residuals were produced by (p + q + P + Q for a SARIMA fit).
pub fn ljung_box(residuals: &[f64], lags: usize, fitted_params: usize) -> LjungBoxResult {
    let n = residuals.len();
    if n < 3 || lags == 0 {
        return LjungBoxResult {
            statistic: f64::NAN,
            p_value: f64::NAN,
            lags: 0,
            df: 0,
        };
    }

    let lags = lags.min(n - 1);
    let df = lags.saturating_sub(fitted_params).max(1);

    let mut q = 0.0;
    for k in 1..=lags {
        let r = autocorrelation(residuals, k);
        if r.is_nan() {
            return LjungBoxResult {
                statistic: f64::NAN,
                p_value: f64::NAN,
                lags,
                df,
            };
        }
        q += r * r / (n - k) as f64;
    }
    q *= n as f64 * (n + 2) as f64;

    LjungBoxResult {
        statistic: q,
        p_value: chi_squared_sf(q, df),
        lags,
        df,
    }
}
