//! Model order specifications.

use std::fmt;

/// Seasonal component of a SARIMA order: (P, D, Q) with period `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalOrder {
    /// Seasonal AR order.
    pub sp: usize,
    /// Seasonal differencing order.
    pub sd: usize,
    /// Seasonal MA order.
    pub sq: usize,
    /// Seasonal period (12 for monthly data).
    pub period: usize,
}

/// A candidate model specification: ARIMA(p, d, q), optionally extended
/// with a multiplicative seasonal component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SarimaOrder {
    /// AR order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// MA order.
    pub q: usize,
    /// Seasonal part, absent for plain ARIMA.
    pub seasonal: Option<SeasonalOrder>,
}

impl SarimaOrder {
    /// Non-seasonal ARIMA(p, d, q).
    pub fn arima(p: usize, d: usize, q: usize) -> Self {
        Self {
            p,
            d,
            q,
            seasonal: None,
        }
    }

    /// Seasonal SARIMA(p, d, q)(P, D, Q)[period].
    pub fn sarima(p: usize, d: usize, q: usize, sp: usize, sd: usize, sq: usize, period: usize) -> Self {
        Self {
            p,
            d,
            q,
            seasonal: Some(SeasonalOrder { sp, sd, sq, period }),
        }
    }

    /// Whether a seasonal component is present.
    pub fn is_seasonal(&self) -> bool {
        self.seasonal.is_some()
    }

    /// Seasonal period, 0 when non-seasonal.
    pub fn period(&self) -> usize {
        self.seasonal.map(|s| s.period).unwrap_or(0)
    }

    /// Seasonal differencing order, 0 when non-seasonal.
    pub fn seasonal_d(&self) -> usize {
        self.seasonal.map(|s| s.sd).unwrap_or(0)
    }

    /// Number of estimated mean-equation parameters (intercept included).
    pub fn num_params(&self) -> usize {
        let seasonal = self.seasonal.map(|s| s.sp + s.sq).unwrap_or(0);
        self.p + self.q + seasonal + 1
    }

    /// Deepest AR-side lag of the expanded model, differencing included.
    pub fn ar_depth(&self) -> usize {
        match self.seasonal {
            Some(s) => self.p + s.period * s.sp,
            None => self.p,
        }
    }

    /// Deepest MA-side lag of the expanded model.
    pub fn ma_depth(&self) -> usize {
        match self.seasonal {
            Some(s) => self.q + s.period * s.sq,
            None => self.q,
        }
    }

    /// Total differencing depth (regular plus seasonal).
    pub fn diff_depth(&self) -> usize {
        match self.seasonal {
            Some(s) => self.d + s.period * s.sd,
            None => self.d,
        }
    }
}

impl fmt::Display for SarimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.seasonal {
            Some(s) => write!(
                f,
                "SARIMA({},{},{})({},{},{})[{}]",
                self.p, self.d, self.q, s.sp, s.sd, s.sq, s.period
            ),
            None => write!(f, "ARIMA({},{},{})", self.p, self.d, self.q),
        }
    }
}
