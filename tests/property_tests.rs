//! Property-based tests for pipeline invariants.

use chrono::{Months, NaiveDate};
use proptest::prelude::*;

use fxcast::core::MonthlySeries;
use fxcast::models::Sarima;
use fxcast::pipeline::forecast_levels;
use fxcast::transform::{exp_transform, log_transform};

/// Positive price levels with mild variation.
fn price_series_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(0.5..500.0_f64, len).prop_map(|mut v| {
            // small drift keeps the variance non-degenerate
            for (i, value) in v.iter_mut().enumerate() {
                *value += i as f64 * 0.001;
            }
            v
        })
    })
}

fn make_series(values: &[f64]) -> MonthlySeries {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let months: Vec<NaiveDate> = (0..values.len())
        .map(|i| start.checked_add_months(Months::new(i as u32)).unwrap())
        .collect();
    MonthlySeries::new("prop", months, values.to_vec()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn back_transform_preserves_interval_ordering(
        pairs in prop::collection::vec((-5.0..5.0_f64, 0.0..3.0_f64), 1..20)
    ) {
        let lower: Vec<f64> = pairs.iter().map(|(l, _)| *l).collect();
        let upper: Vec<f64> = pairs.iter().map(|(l, w)| l + w).collect();
        let lo = exp_transform(&lower);
        let up = exp_transform(&upper);
        for (l, u) in lo.iter().zip(&up) {
            prop_assert!(l <= u);
        }
    }

    #[test]
    fn log_transform_round_trips(values in prop::collection::vec(0.01..1000.0_f64, 1..50)) {
        let logs = log_transform(&values).unwrap();
        let back = exp_transform(&logs);
        for (orig, recovered) in values.iter().zip(&back) {
            prop_assert!((orig - recovered).abs() < 1e-9 * orig.abs());
        }
    }

    #[test]
    fn forecast_horizon_matches_request(
        values in price_series_strategy(24, 72),
        horizon in 1usize..18
    ) {
        let series = make_series(&values);
        let mut model = Sarima::arima(0, 1, 0);
        model.fit(&log_transform(series.values()).unwrap()).unwrap();
        let forecast = forecast_levels(&series, &model, horizon, 0.95).unwrap();
        prop_assert_eq!(forecast.horizon(), horizon);
    }

    #[test]
    fn forecast_index_is_contiguous_and_disjoint_from_training(
        values in price_series_strategy(24, 72),
        horizon in 1usize..18
    ) {
        let series = make_series(&values);
        let mut model = Sarima::arima(0, 1, 0);
        model.fit(&log_transform(series.values()).unwrap()).unwrap();
        let forecast = forecast_levels(&series, &model, horizon, 0.95).unwrap();

        let months: Vec<NaiveDate> = forecast.months().collect();
        prop_assert_eq!(
            months[0],
            series.last_month().checked_add_months(Months::new(1)).unwrap()
        );
        for w in months.windows(2) {
            prop_assert_eq!(w[0].checked_add_months(Months::new(1)), Some(w[1]));
        }
        prop_assert!(months[0] > series.last_month());
    }

    #[test]
    fn forecast_intervals_bracket_the_point(
        values in price_series_strategy(30, 60)
    ) {
        let series = make_series(&values);
        let mut model = Sarima::arima(1, 1, 0);
        model.fit(&log_transform(series.values()).unwrap()).unwrap();
        let forecast = forecast_levels(&series, &model, 12, 0.95).unwrap();
        for step in forecast.steps() {
            prop_assert!(step.lower <= step.point);
            prop_assert!(step.point <= step.upper);
            prop_assert!(step.lower > 0.0); // levels stay positive after exp
        }
    }
}
