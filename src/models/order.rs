//! SARIMA order specifications.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Non-seasonal order (p, d, q).
///
/// Serialized as a `[p, d, q]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize, usize)", into = "(usize, usize, usize)")]
pub struct Order {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl Order {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl From<(usize, usize, usize)> for Order {
    fn from((p, d, q): (usize, usize, usize)) -> Self {
        Self::new(p, d, q)
    }
}

impl From<Order> for (usize, usize, usize) {
    fn from(order: Order) -> Self {
        (order.p, order.d, order.q)
    }
}

/// Seasonal order (P, D, Q, s).
///
/// Serialized as a `[P, D, Q, s]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "(usize, usize, usize, usize)",
    into = "(usize, usize, usize, usize)"
)]
pub struct SeasonalOrder {
    /// Seasonal AR order (P)
    pub cap_p: usize,
    /// Seasonal differencing order (D)
    pub cap_d: usize,
    /// Seasonal MA order (Q)
    pub cap_q: usize,
    /// Seasonal period (s)
    pub s: usize,
}

impl SeasonalOrder {
    pub fn new(cap_p: usize, cap_d: usize, cap_q: usize, s: usize) -> Self {
        Self {
            cap_p,
            cap_d,
            cap_q,
            s,
        }
    }

    /// Monthly data with a yearly cycle.
    pub fn monthly(cap_p: usize, cap_d: usize, cap_q: usize) -> Self {
        Self::new(cap_p, cap_d, cap_q, 12)
    }

    /// No seasonal component.
    pub fn none() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn is_seasonal(&self) -> bool {
        self.s > 1 && (self.cap_p > 0 || self.cap_d > 0 || self.cap_q > 0)
    }
}

impl From<(usize, usize, usize, usize)> for SeasonalOrder {
    fn from((cap_p, cap_d, cap_q, s): (usize, usize, usize, usize)) -> Self {
        Self::new(cap_p, cap_d, cap_q, s)
    }
}

impl From<SeasonalOrder> for (usize, usize, usize, usize) {
    fn from(order: SeasonalOrder) -> Self {
        (order.cap_p, order.cap_d, order.cap_q, order.s)
    }
}

/// Full hyperparameter set for a SARIMA(p, d, q)(P, D, Q)\[s\] model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HyperparameterSet {
    pub order: Order,
    pub seasonal_order: SeasonalOrder,
}

impl HyperparameterSet {
    /// Create and validate a hyperparameter set.
    pub fn new(order: Order, seasonal_order: SeasonalOrder) -> Result<Self> {
        let params = Self {
            order,
            seasonal_order,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the seasonal period is usable when seasonal terms are present.
    pub fn validate(&self) -> Result<()> {
        let so = &self.seasonal_order;
        if (so.cap_p > 0 || so.cap_d > 0 || so.cap_q > 0) && so.s < 2 {
            return Err(Error::Configuration(format!(
                "seasonal period must be at least 2 when seasonal terms are set, got {}",
                so.s
            )));
        }
        Ok(())
    }

    /// Seasonal period, or 0 when the model has no seasonal part.
    pub fn period(&self) -> usize {
        if self.seasonal_order.is_seasonal() {
            self.seasonal_order.s
        } else {
            0
        }
    }

    /// Lag of the expanded AR polynomial: p + s * P.
    pub fn ar_lag(&self) -> usize {
        self.order.p + self.period() * self.seasonal_order.cap_p
    }

    /// Lag of the expanded MA polynomial: q + s * Q.
    pub fn ma_lag(&self) -> usize {
        self.order.q + self.period() * self.seasonal_order.cap_q
    }

    /// Observations consumed by differencing: d + s * D.
    pub fn differencing_lag(&self) -> usize {
        self.order.d + self.period() * self.seasonal_order.cap_d
    }

    /// Whether a mean term is estimated (only for undifferenced models).
    pub fn has_mean(&self) -> bool {
        self.differencing_lag() == 0
    }

    /// Number of free parameters.
    pub fn num_params(&self) -> usize {
        self.order.p
            + self.order.q
            + self.seasonal_order.cap_p
            + self.seasonal_order.cap_q
            + usize::from(self.has_mean())
    }

    /// Minimum number of observations needed to fit these orders.
    pub fn min_observations(&self) -> usize {
        let so = &self.seasonal_order;
        let seasonal_floor = self.period() * (so.cap_d + 1) + self.order.d + 1;
        let lag_floor = self.differencing_lag() + self.ar_lag() + self.num_params() + 1;
        seasonal_floor.max(lag_floor)
    }
}

impl std::fmt::Display for HyperparameterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let o = &self.order;
        let so = &self.seasonal_order;
        write!(
            f,
            "SARIMA({},{},{})({},{},{})[{}]",
            o.p, o.d, o.q, so.cap_p, so.cap_d, so.cap_q, so.s
        )
    }
}
