//! Exhaustive AIC grid search over candidate model orders.

use crate::error::{ForecastError, Result};
use crate::models::order::SarimaOrder;
use crate::models::sarima::Sarima;

/// Seasonal part of a search grid.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalGrid {
    /// Inclusive upper bound on the seasonal AR order.
    pub max_p: usize,
    /// Inclusive upper bound on the seasonal differencing order.
    pub max_d: usize,
    /// Inclusive upper bound on the seasonal MA order.
    pub max_q: usize,
    /// Seasonal period.
    pub period: usize,
}

/// Inclusive order ranges swept by the grid search.
#[derive(Debug, Clone, Copy)]
pub struct SearchGrid {
    pub max_p: usize,
    pub max_d: usize,
    pub max_q: usize,
    pub seasonal: Option<SeasonalGrid>,
}

impl SearchGrid {
    /// The non-seasonal grid of the analysis scripts:
    /// p in [0,3], d in [0,2], q in [0,3] - 48 candidates.
    pub fn arima_default() -> Self {
        Self {
            max_p: 3,
            max_d: 2,
            max_q: 3,
            seasonal: None,
        }
    }

    /// The seasonal grid: p,d,q in [0,2] crossed with P,D,Q in [0,1]
    /// at the given period - 216 candidates.
    pub fn sarima_default(period: usize) -> Self {
        Self {
            max_p: 2,
            max_d: 2,
            max_q: 2,
            seasonal: Some(SeasonalGrid {
                max_p: 1,
                max_d: 1,
                max_q: 1,
                period,
            }),
        }
    }

    /// All candidate orders in ascending lexicographic order, so the
    /// tie-break below favors the more parsimonious specification.
    pub fn candidates(&self) -> Vec<SarimaOrder> {
        let mut orders = Vec::new();
        for p in 0..=self.max_p {
            for d in 0..=self.max_d {
                for q in 0..=self.max_q {
                    match self.seasonal {
                        None => orders.push(SarimaOrder::arima(p, d, q)),
                        Some(grid) => {
                            for sp in 0..=grid.max_p {
                                for sd in 0..=grid.max_d {
                                    for sq in 0..=grid.max_q {
                                        orders.push(SarimaOrder::sarima(
                                            p,
                                            d,
                                            q,
                                            sp,
                                            sd,
                                            sq,
                                            grid.period,
                                        ));
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        orders
    }
}

/// What happened to one candidate order.
#[derive(Debug, Clone)]
pub enum FitOutcome {
    /// The candidate fitted and produced a finite AIC.
    Fitted { aic: f64 },
    /// The candidate was skipped or diverged; the reason is kept so
    /// failures stay inspectable instead of silently vanishing.
    Failed { reason: String },
}

/// Per-candidate record of the grid walk.
#[derive(Debug, Clone)]
pub struct FitAttempt {
    pub order: SarimaOrder,
    pub outcome: FitOutcome,
}

/// The winning candidate plus the full attempt log.
#[derive(Debug)]
pub struct SearchResult {
    /// Winning order.
    pub order: SarimaOrder,
    /// Its AIC.
    pub aic: f64,
    /// The fitted model, ready to forecast.
    pub model: Sarima,
    /// Every candidate tried, in enumeration order.
    pub attempts: Vec<FitAttempt>,
}

impl SearchResult {
    /// Number of candidates that fitted successfully.
    pub fn n_fitted(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, FitOutcome::Fitted { .. }))
            .count()
    }
}

/// Walk `orders`, evaluating each with `eval`, and keep the candidate
/// with the strictly lowest AIC. A failed evaluation is recorded and
/// skipped - it never aborts the walk. Equal AIC keeps the earlier
/// candidate (strict `<`), which with ascending enumeration resolves
/// ties toward parsimony.
fn run_search<F>(orders: Vec<SarimaOrder>, mut eval: F) -> Result<SearchResult>
where
    F: FnMut(SarimaOrder) -> std::result::Result<(Sarima, f64), String>,
{
    let mut attempts = Vec::with_capacity(orders.len());
    let mut best: Option<(SarimaOrder, f64, Sarima)> = None;

    for order in orders {
        match eval(order) {
            Ok((model, aic)) => {
                attempts.push(FitAttempt {
                    order,
                    outcome: FitOutcome::Fitted { aic },
                });
                let replace = match &best {
                    Some((_, best_aic, _)) => aic < *best_aic,
                    None => true,
                };
                if replace {
                    best = Some((order, aic, model));
                }
            }
            Err(reason) => {
                attempts.push(FitAttempt {
                    order,
                    outcome: FitOutcome::Failed { reason },
                });
            }
        }
    }

    match best {
        Some((order, aic, model)) => Ok(SearchResult {
            order,
            aic,
            model,
            attempts,
        }),
        None => Err(ForecastError::NoModelFit {
            attempted: attempts.len(),
        }),
    }
}

/// Grid-search the best model for a (log-transformed) series by AIC.
pub fn select_best(y: &[f64], grid: &SearchGrid) -> Result<SearchResult> {
    run_search(grid.candidates(), |order| {
        let mut model = Sarima::with_order(order);
        match model.fit(y) {
            Ok(()) => match model.aic() {
                Some(aic) if aic.is_finite() => Ok((model, aic)),
                _ => Err("non-finite AIC".to_string()),
            },
            Err(e) => Err(e.to_string()),
        }
    })
}
