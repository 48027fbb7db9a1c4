//! Differencing and integration for (seasonal) ARIMA models.

/// Apply `d` rounds of first differencing.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Apply `d` rounds of lag-`period` seasonal differencing.
pub fn seasonal_difference(series: &[f64], d: usize, period: usize) -> Vec<f64> {
    if period == 0 {
        return series.to_vec();
    }
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= period {
            break;
        }
        result = result
            .iter()
            .skip(period)
            .zip(result.iter())
            .map(|(curr, prev)| curr - prev)
            .collect();
    }
    result
}

/// Undo `d` rounds of first differencing on out-of-sample forecasts.
///
/// `history` is the series the forecasts continue, before differencing.
pub fn integrate(forecast: &[f64], history: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || forecast.is_empty() {
        return forecast.to_vec();
    }

    let mut result = forecast.to_vec();
    for level in (0..d).rev() {
        let intermediate = difference(history, level);
        let init = *intermediate.last().unwrap_or(&0.0);
        let mut cumsum = init;
        for value in result.iter_mut() {
            cumsum += *value;
            *value = cumsum;
        }
    }
    result
}

/// Undo one round of lag-`period` seasonal differencing on forecasts.
///
/// Each forecast step adds back the observation one period earlier,
/// taken from `history` while it reaches back far enough and from the
/// already-integrated forecasts afterwards.
pub fn seasonal_integrate(forecast: &[f64], history: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || forecast.is_empty() {
        return forecast.to_vec();
    }

    let n = history.len();
    let mut result: Vec<f64> = Vec::with_capacity(forecast.len());
    for (h, &value) in forecast.iter().enumerate() {
        let back = n + h - period;
        let prev = if back < n {
            history[back]
        } else {
            result[back - n]
        };
        result.push(value + prev);
    }
    result
}
