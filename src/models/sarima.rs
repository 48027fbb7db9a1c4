//! Seasonal ARIMA model fitted by conditional sum of squares.
//!
//! One type covers both plain ARIMA(p,d,q) and multiplicative seasonal
//! SARIMA(p,d,q)(P,D,Q)[s]: the seasonal lag polynomials are expanded
//! into combined lag weights before the CSS recursion, so the same
//! fitting and forecasting machinery serves both.

use crate::core::LogForecast;
use crate::error::{ForecastError, Result};
use crate::models::diff::{difference, integrate, seasonal_difference, seasonal_integrate};
use crate::models::estimate::{gauss_newton_se, minimize, SimplexOptions};
use crate::models::order::SarimaOrder;
use crate::stats::normal_quantile;

/// Expand a product of a base lag polynomial and a seasonal lag
/// polynomial into weights indexed by lag. For the AR side
/// (1 - Σφ_i B^i)(1 - ΣΦ_j B^{js}) the cross terms carry a minus sign;
/// for the MA side (1 + Σθ_i B^i)(1 + ΣΘ_j B^{js}) they are positive.
fn lag_weights(base: &[f64], seasonal: &[f64], period: usize, cross_sign: f64) -> Vec<f64> {
    let max_lag = base.len() + period * seasonal.len();
    let mut weights = vec![0.0; max_lag + 1];
    for (i, &b) in base.iter().enumerate() {
        weights[i + 1] += b;
    }
    for (j, &s) in seasonal.iter().enumerate() {
        let seasonal_lag = (j + 1) * period;
        weights[seasonal_lag] += s;
        for (i, &b) in base.iter().enumerate() {
            weights[seasonal_lag + i + 1] += cross_sign * b * s;
        }
    }
    weights
}

/// One CSS pass: predict each differenced observation from the expanded
/// lag weights, returning the sum of squares, the residual sequence
/// (zeros over the warm-up region) and the warm-up length.
fn css_pass(w: &[f64], mu: f64, ar: &[f64], ma: &[f64]) -> (f64, Vec<f64>, usize) {
    let start = (ar.len() - 1).max(ma.len() - 1);
    let n = w.len();
    let mut residuals = vec![0.0; n];
    let mut css = 0.0;

    for t in start..n {
        let mut pred = mu;
        for (k, &weight) in ar.iter().enumerate().skip(1) {
            if weight != 0.0 {
                pred += weight * (w[t - k] - mu);
            }
        }
        for (k, &weight) in ma.iter().enumerate().skip(1) {
            if weight != 0.0 {
                pred += weight * residuals[t - k];
            }
        }
        let error = w[t] - pred;
        residuals[t] = error;
        css += error * error;
    }

    (css, residuals, start)
}

/// Multiply two lag polynomials given as coefficient vectors (index =
/// power of the backshift operator).
fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0.0 {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// Seasonal ARIMA model.
#[derive(Debug, Clone)]
pub struct Sarima {
    order: SarimaOrder,
    /// Estimated parameters: [intercept, ar.., ma.., sar.., sma..].
    params: Option<Vec<f64>>,
    /// Standard errors aligned with `params`.
    std_errors: Option<Vec<f64>>,
    /// Training series (log scale).
    y: Option<Vec<f64>>,
    /// After seasonal differencing.
    z: Option<Vec<f64>>,
    /// After seasonal and regular differencing.
    w: Option<Vec<f64>>,
    /// Residuals aligned with `w`, zeros over the warm-up region.
    residuals_full: Option<Vec<f64>>,
    /// Warm-up length of the CSS recursion.
    start: usize,
    sigma2: Option<f64>,
    loglik: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
}

impl Sarima {
    /// Create an unfitted model with the given order.
    pub fn with_order(order: SarimaOrder) -> Self {
        Self {
            order,
            params: None,
            std_errors: None,
            y: None,
            z: None,
            w: None,
            residuals_full: None,
            start: 0,
            sigma2: None,
            loglik: None,
            aic: None,
            bic: None,
        }
    }

    /// Plain ARIMA(p, d, q).
    pub fn arima(p: usize, d: usize, q: usize) -> Self {
        Self::with_order(SarimaOrder::arima(p, d, q))
    }

    /// The model order.
    pub fn order(&self) -> SarimaOrder {
        self.order
    }

    /// Model family name.
    pub fn name(&self) -> &'static str {
        if self.order.is_seasonal() {
            "SARIMA"
        } else {
            "ARIMA"
        }
    }

    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    pub fn bic(&self) -> Option<f64> {
        self.bic
    }

    pub fn loglik(&self) -> Option<f64> {
        self.loglik
    }

    /// Residual variance on the differenced scale.
    pub fn sigma2(&self) -> Option<f64> {
        self.sigma2
    }

    /// Number of training observations.
    pub fn n_obs(&self) -> usize {
        self.y.as_ref().map(|y| y.len()).unwrap_or(0)
    }

    /// Observations entering the sum of squares.
    pub fn n_effective(&self) -> usize {
        self.w
            .as_ref()
            .map(|w| w.len().saturating_sub(self.start))
            .unwrap_or(0)
    }

    /// Residuals of the fit (log scale, warm-up excluded).
    pub fn residuals(&self) -> Option<&[f64]> {
        self.residuals_full.as_ref().map(|r| &r[self.start..])
    }

    /// Index into the training series of the first residual: residual
    /// `t` belongs to observation `residual_offset() + t`.
    pub fn residual_offset(&self) -> usize {
        self.order.diff_depth() + self.start
    }

    /// Estimated coefficients as (name, value) pairs, intercept first.
    pub fn coefficients(&self) -> Vec<(String, f64)> {
        let Some(params) = &self.params else {
            return vec![];
        };
        let mut names = vec!["intercept".to_string()];
        names.extend((1..=self.order.p).map(|i| format!("ar{i}")));
        names.extend((1..=self.order.q).map(|i| format!("ma{i}")));
        if let Some(s) = self.order.seasonal {
            names.extend((1..=s.sp).map(|i| format!("sar{i}")));
            names.extend((1..=s.sq).map(|i| format!("sma{i}")));
        }
        names.into_iter().zip(params.iter().copied()).collect()
    }

    /// Standard errors aligned with [`coefficients`](Self::coefficients),
    /// `None` when the information matrix was singular.
    pub fn standard_errors(&self) -> Option<&[f64]> {
        self.std_errors.as_deref()
    }

    /// Split a parameter vector into (intercept, ar, ma, sar, sma).
    fn split_params<'a>(&self, params: &'a [f64]) -> (f64, &'a [f64], &'a [f64], &'a [f64], &'a [f64]) {
        let p = self.order.p;
        let q = self.order.q;
        let (sp, sq) = self
            .order
            .seasonal
            .map(|s| (s.sp, s.sq))
            .unwrap_or((0, 0));
        let mu = params[0];
        let ar = &params[1..1 + p];
        let ma = &params[1 + p..1 + p + q];
        let sar = &params[1 + p + q..1 + p + q + sp];
        let sma = &params[1 + p + q + sp..1 + p + q + sp + sq];
        (mu, ar, ma, sar, sma)
    }

    /// Expanded (AR weights, MA weights) for a parameter vector.
    fn expanded_weights(&self, params: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let (_, ar, ma, sar, sma) = self.split_params(params);
        let period = self.order.period().max(1);
        (
            lag_weights(ar, sar, period, -1.0),
            lag_weights(ma, sma, period, 1.0),
        )
    }

    /// Fit the model to a (log-transformed) series.
    pub fn fit(&mut self, y: &[f64]) -> Result<()> {
        let order = self.order;
        let needed = order.diff_depth() + order.ar_depth().max(order.ma_depth()) + 5;
        if y.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: y.len(),
            });
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidParameter(
                "series contains non-finite values".to_string(),
            ));
        }

        let period = order.period();
        let z = seasonal_difference(y, order.seasonal_d(), period);
        let w = difference(&z, order.d);

        let n_coefs = order.num_params() - 1;
        let mean = w.iter().sum::<f64>() / w.len() as f64;

        let params = if n_coefs == 0 {
            vec![mean]
        } else {
            let mut initial = vec![0.0; n_coefs + 1];
            initial[0] = mean;
            for (i, value) in initial.iter_mut().enumerate().skip(1) {
                *value = 0.1 / i as f64;
            }
            let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
            bounds.extend(std::iter::repeat((-0.99, 0.99)).take(n_coefs));

            let outcome = minimize(
                |candidate| {
                    let (mu, ..) = self.split_params(candidate);
                    let (ar, ma) = self.expanded_weights(candidate);
                    let (css, _, _) = css_pass(&w, mu, &ar, &ma);
                    if css.is_finite() {
                        css
                    } else {
                        f64::MAX
                    }
                },
                &initial,
                &bounds,
                &SimplexOptions::default(),
            );
            outcome.point
        };

        let (mu, ..) = self.split_params(&params);
        let (ar, ma) = self.expanded_weights(&params);
        let (css, residuals, start) = css_pass(&w, mu, &ar, &ma);

        let n_eff = w.len() - start;
        if n_eff == 0 {
            return Err(ForecastError::InsufficientData {
                needed: start + 1,
                got: w.len(),
            });
        }
        if !css.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "{order} fit diverged"
            )));
        }

        let sigma2 = css / n_eff as f64;
        let k = order.num_params() as f64;
        let loglik =
            -0.5 * n_eff as f64 * (1.0 + sigma2.ln() + (2.0 * std::f64::consts::PI).ln());
        self.aic = Some(-2.0 * loglik + 2.0 * k);
        self.bic = Some(-2.0 * loglik + k * (n_eff as f64).ln());
        self.loglik = Some(loglik);
        self.sigma2 = Some(sigma2);

        self.std_errors = gauss_newton_se(
            |candidate| {
                let (mu, ..) = self.split_params(candidate);
                let (ar, ma) = self.expanded_weights(candidate);
                let (_, resid, start) = css_pass(&w, mu, &ar, &ma);
                resid[start..].to_vec()
            },
            &params,
            sigma2,
        );

        self.params = Some(params);
        self.y = Some(y.to_vec());
        self.z = Some(z);
        self.w = Some(w);
        self.residuals_full = Some(residuals);
        self.start = start;

        Ok(())
    }

    /// Impulse-response weights of the integrated process, used for the
    /// horizon-dependent forecast variance. Differencing is folded into
    /// the AR polynomial, so integrated models get growing intervals
    /// while stationary ones stay flat.
    fn psi_weights(&self, ar: &[f64], ma: &[f64], horizon: usize) -> Vec<f64> {
        let order = self.order;
        let mut poly = vec![0.0; ar.len().max(1)];
        poly[0] = 1.0;
        for (k, &weight) in ar.iter().enumerate().skip(1) {
            poly[k] = -weight;
        }
        for _ in 0..order.d {
            poly = poly_mul(&poly, &[1.0, -1.0]);
        }
        if let Some(s) = order.seasonal {
            let mut seasonal = vec![0.0; s.period + 1];
            seasonal[0] = 1.0;
            seasonal[s.period] = -1.0;
            for _ in 0..s.sd {
                poly = poly_mul(&poly, &seasonal);
            }
        }
        let phi: Vec<f64> = poly.iter().skip(1).map(|c| -c).collect();

        let mut psi = vec![0.0; horizon];
        for j in 0..horizon {
            if j == 0 {
                psi[0] = 1.0;
                continue;
            }
            let mut value = if j < ma.len() { ma[j] } else { 0.0 };
            for i in 1..=j.min(phi.len()) {
                value += phi[i - 1] * psi[j - i];
            }
            psi[j] = value;
        }
        psi
    }

    /// Forecast `horizon` steps ahead with confidence intervals at the
    /// given level, all on the scale the model was fitted on.
    pub fn forecast(&self, horizon: usize, level: f64) -> Result<LogForecast> {
        let params = self.params.as_ref().ok_or(ForecastError::FitRequired)?;
        let y = self.y.as_ref().ok_or(ForecastError::FitRequired)?;
        let z = self.z.as_ref().ok_or(ForecastError::FitRequired)?;
        let w = self.w.as_ref().ok_or(ForecastError::FitRequired)?;
        let residuals = self
            .residuals_full
            .as_ref()
            .ok_or(ForecastError::FitRequired)?;
        let sigma2 = self.sigma2.ok_or(ForecastError::FitRequired)?;

        if level <= 0.0 || level >= 1.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "confidence level must be in (0, 1), got {level}"
            )));
        }
        if horizon == 0 {
            return Ok(LogForecast {
                point: vec![],
                lower: vec![],
                upper: vec![],
            });
        }

        let (mu, ..) = self.split_params(params);
        let (ar, ma) = self.expanded_weights(params);
        let order = self.order;

        // Recursive extension on the differenced scale; future shocks
        // enter as zero.
        let mut extended = w.clone();
        let mut extended_resid = residuals.clone();
        for _ in 0..horizon {
            let t = extended.len();
            let mut pred = mu;
            for (k, &weight) in ar.iter().enumerate().skip(1) {
                if weight != 0.0 && t >= k {
                    pred += weight * (extended[t - k] - mu);
                }
            }
            for (k, &weight) in ma.iter().enumerate().skip(1) {
                if weight != 0.0 && t >= k {
                    pred += weight * extended_resid[t - k];
                }
            }
            extended.push(pred);
            extended_resid.push(0.0);
        }
        let forecast_w: Vec<f64> = extended[w.len()..].to_vec();

        // Undo regular differencing against the seasonally differenced
        // history, then unwind each seasonal differencing level.
        let mut point = integrate(&forecast_w, z, order.d);
        if let Some(s) = order.seasonal {
            for m in (0..s.sd).rev() {
                let history = seasonal_difference(y, m, s.period);
                point = seasonal_integrate(&point, &history, s.period);
            }
        }

        let psi = self.psi_weights(&ar, &ma, horizon);
        let zscore = normal_quantile((1.0 + level) / 2.0);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        let mut psi_sq_sum = 0.0;
        for h in 0..horizon {
            psi_sq_sum += psi[h] * psi[h];
            let se = (sigma2 * psi_sq_sum).sqrt();
            lower.push(point[h] - zscore * se);
            upper.push(point[h] + zscore * se);
        }

        Ok(LogForecast {
            point,
            lower,
            upper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ar1_series(n: usize, phi: f64) -> Vec<f64> {
        let mut values = vec![1.0];
        for i in 1..n {
            values.push(phi * values[i - 1] + (i as f64 * 0.7).sin() * 0.1);
        }
        values
    }

    #[test]
    fn lag_weights_expand_multiplicative_polynomials() {
        // (1 - 0.5B)(1 - 0.4B^4): weights at lags 1, 4, 5
        let weights = lag_weights(&[0.5], &[0.4], 4, -1.0);
        assert_relative_eq!(weights[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(weights[4], 0.4, epsilon = 1e-12);
        assert_relative_eq!(weights[5], -0.2, epsilon = 1e-12);

        // MA side carries positive cross terms
        let weights = lag_weights(&[0.5], &[0.4], 4, 1.0);
        assert_relative_eq!(weights[5], 0.2, epsilon = 1e-12);
    }

    #[test]
    fn mean_only_model_recovers_the_mean() {
        let values = vec![2.0, 2.2, 1.8, 2.1, 1.9, 2.0, 2.05, 1.95, 2.0, 2.0];
        let mut model = Sarima::arima(0, 0, 0);
        model.fit(&values).unwrap();

        let coefs = model.coefficients();
        assert_eq!(coefs.len(), 1);
        assert_eq!(coefs[0].0, "intercept");
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        assert_relative_eq!(coefs[0].1, mean, epsilon = 1e-9);

        let forecast = model.forecast(3, 0.95).unwrap();
        for &p in &forecast.point {
            assert_relative_eq!(p, mean, epsilon = 1e-9);
        }
    }

    #[test]
    fn ar1_fit_finds_positive_coefficient() {
        let values = ar1_series(120, 0.7);
        let mut model = Sarima::arima(1, 0, 0);
        model.fit(&values).unwrap();

        let coefs = model.coefficients();
        assert_eq!(coefs.len(), 2);
        assert!(coefs[1].1 > 0.3, "ar1 = {}", coefs[1].1);
        assert!(model.aic().is_some());
        assert!(model.sigma2().unwrap() > 0.0);
    }

    #[test]
    fn random_walk_forecast_continues_trend() {
        let values: Vec<f64> = (0..60).map(|i| 10.0 + 0.5 * i as f64).collect();
        let mut model = Sarima::arima(0, 1, 0);
        model.fit(&values).unwrap();

        let forecast = model.forecast(5, 0.95).unwrap();
        // drift of ~0.5 per step continues
        assert_relative_eq!(forecast.point[0], 39.5 + 0.5, epsilon = 0.2);
        assert_relative_eq!(forecast.point[4], 39.5 + 2.5, epsilon = 0.5);
    }

    #[test]
    fn intervals_are_ordered_and_widen_for_integrated_models() {
        let values: Vec<f64> = (0..80)
            .map(|i| 10.0 + 0.3 * i as f64 + (i as f64 * 0.9).sin())
            .collect();
        let mut model = Sarima::arima(1, 1, 1);
        model.fit(&values).unwrap();

        let forecast = model.forecast(12, 0.95).unwrap();
        let mut prev_width = 0.0;
        for h in 0..12 {
            assert!(forecast.lower[h] <= forecast.point[h]);
            assert!(forecast.point[h] <= forecast.upper[h]);
            let width = forecast.upper[h] - forecast.lower[h];
            assert!(width >= prev_width - 1e-9);
            prev_width = width;
        }
    }

    #[test]
    fn psi_weights_for_pure_random_walk_are_all_one() {
        let values: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let mut model = Sarima::arima(0, 1, 0);
        model.fit(&values).unwrap();
        let params = model.params.clone().unwrap();
        let (ar, ma) = model.expanded_weights(&params);
        let psi = model.psi_weights(&ar, &ma, 6);
        for &p in &psi {
            assert_relative_eq!(p, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn seasonal_fit_tracks_seasonal_pattern() {
        let n = 72;
        let values: Vec<f64> = (0..n)
            .map(|i| {
                50.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin()
            })
            .collect();
        let mut model = Sarima::with_order(SarimaOrder::sarima(0, 0, 0, 0, 1, 0, 12));
        model.fit(&values).unwrap();

        let forecast = model.forecast(12, 0.95).unwrap();
        // pure seasonal random walk reproduces last year's shape
        for h in 0..12 {
            let expected = values[n - 12 + h];
            assert_relative_eq!(forecast.point[h], expected, epsilon = 0.5);
        }
    }

    #[test]
    fn forecast_before_fit_fails() {
        let model = Sarima::arima(1, 0, 0);
        assert!(matches!(
            model.forecast(5, 0.95),
            Err(ForecastError::FitRequired)
        ));
    }

    #[test]
    fn insufficient_data_is_rejected() {
        let mut model = Sarima::arima(3, 2, 3);
        let result = model.fit(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            result,
            Err(ForecastError::InsufficientData { .. })
        ));
    }

    #[test]
    fn invalid_confidence_level_is_rejected() {
        let mut model = Sarima::arima(0, 0, 0);
        model.fit(&[1.0, 2.0, 1.5, 1.8, 2.1, 1.9, 2.0, 1.7, 2.2, 1.6]).unwrap();
        assert!(model.forecast(3, 1.5).is_err());
        assert!(model.forecast(3, 0.95).is_ok());
    }

    #[test]
    fn zero_horizon_forecast_is_empty() {
        let mut model = Sarima::arima(0, 0, 0);
        model.fit(&[1.0, 2.0, 1.5, 1.8, 2.1, 1.9, 2.0, 1.7, 2.2, 1.6]).unwrap();
        let forecast = model.forecast(0, 0.95).unwrap();
        assert_eq!(forecast.horizon(), 0);
    }

    #[test]
    fn residuals_are_exposed_with_offset() {
        let values = ar1_series(60, 0.5);
        let mut model = Sarima::arima(1, 1, 1);
        model.fit(&values).unwrap();

        let residuals = model.residuals().unwrap();
        // d=1 drops one observation, warm-up drops max(p, q) more
        assert_eq!(residuals.len(), values.len() - 1 - model.start);
        assert_eq!(model.residual_offset(), 1 + model.start);
        assert_eq!(model.n_effective(), residuals.len());
    }

    #[test]
    fn standard_errors_align_with_coefficients() {
        let values = ar1_series(100, 0.6);
        let mut model = Sarima::arima(1, 0, 1);
        model.fit(&values).unwrap();

        let coefs = model.coefficients();
        if let Some(se) = model.standard_errors() {
            assert_eq!(se.len(), coefs.len());
            for &s in se {
                assert!(s.is_finite() || s.is_nan());
            }
        }
    }
}
