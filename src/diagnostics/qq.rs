//! Normal quantile-quantile points for residual diagnostics.

use crate::stats::{mean, normal_quantile, std_dev};

/// One QQ point: theoretical standard-normal quantile against the
/// corresponding sample quantile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QqPoint {
    pub theoretical: f64,
    pub sample: f64,
}

/// QQ points for a residual sample, sorted by theoretical quantile,
/// using the Blom plotting positions (i + 0.5) / n.
pub fn qq_points(residuals: &[f64]) -> Vec<QqPoint> {
    let n = residuals.len();
    if n == 0 {
        return vec![];
    }

    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, sample)| QqPoint {
            theoretical: normal_quantile((i as f64 + 0.5) / n as f64),
            sample,
        })
        .collect()
}

/// Reference line for a QQ chart, fitted by sample moments: the sample
/// quantile a normal with the residuals' mean and spread would give.
pub fn reference_line(residuals: &[f64], theoretical: f64) -> f64 {
    mean(residuals) + std_dev(residuals) * theoretical
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn points_are_sorted_and_symmetric() {
        let residuals = vec![0.3, -1.0, 0.0, 1.0, -0.3];
        let points = qq_points(&residuals);
        assert_eq!(points.len(), 5);
        for w in points.windows(2) {
            assert!(w[0].theoretical <= w[1].theoretical);
            assert!(w[0].sample <= w[1].sample);
        }
        // symmetric sample, symmetric positions: middle point at the median
        assert_relative_eq!(points[2].theoretical, 0.0, epsilon = 1e-9);
        assert_relative_eq!(points[2].sample, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_input_yields_no_points() {
        assert!(qq_points(&[]).is_empty());
    }

    #[test]
    fn reference_line_passes_through_the_mean() {
        let residuals = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(reference_line(&residuals, 0.0), 3.0, epsilon = 1e-12);
    }
}
