//! Multiplicative seasonal ARIMA model.

use crate::core::ObservationSeries;
use crate::error::{Error, Result};
use crate::models::arima::diff::{apply_differencing, differencing_polynomial, integrate, poly_mul};
use crate::models::order::{HyperparameterSet, Order, SeasonalOrder};
use crate::models::Forecaster;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};

const COEFFICIENT_BOUND: f64 = 0.99;

/// Estimated coefficients of a SARIMA model.
#[derive(Debug, Clone, Default, PartialEq)]
struct Coefficients {
    mean: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    seasonal_ar: Vec<f64>,
    seasonal_ma: Vec<f64>,
}

impl Coefficients {
    /// Split an optimizer point laid out as `[mean?, ar.., ma.., sar.., sma..]`.
    fn unpack(params: &HyperparameterSet, point: &[f64]) -> Self {
        let mut rest = point;
        let mut take = |n: usize| {
            let (head, tail) = rest.split_at(n);
            rest = tail;
            head.to_vec()
        };
        let mean = if params.has_mean() { take(1)[0] } else { 0.0 };
        Self {
            mean,
            ar: take(params.order.p),
            ma: take(params.order.q),
            seasonal_ar: take(params.seasonal_order.cap_p),
            seasonal_ma: take(params.seasonal_order.cap_q),
        }
    }

    /// Expanded AR lags `a_1..a_K` of `phi(B) Phi(B^s) = 1 - sum a_k B^k`.
    fn expanded_ar(&self, period: usize) -> Vec<f64> {
        let nonseasonal = lag_polynomial(&self.ar, 1, -1.0);
        let seasonal = lag_polynomial(&self.seasonal_ar, period, -1.0);
        poly_mul(&nonseasonal, &seasonal)
            .into_iter()
            .skip(1)
            .map(|c| -c)
            .collect()
    }

    /// Expanded MA lags `b_1..b_K` of `theta(B) Theta(B^s) = 1 + sum b_k B^k`.
    fn expanded_ma(&self, period: usize) -> Vec<f64> {
        let nonseasonal = lag_polynomial(&self.ma, 1, 1.0);
        let seasonal = lag_polynomial(&self.seasonal_ma, period, 1.0);
        poly_mul(&nonseasonal, &seasonal).into_iter().skip(1).collect()
    }
}

/// `1 + sign * sum c_j B^(j * spacing)` as a coefficient vector.
fn lag_polynomial(coefficients: &[f64], spacing: usize, sign: f64) -> Vec<f64> {
    if coefficients.is_empty() || spacing == 0 {
        return vec![1.0];
    }
    let mut poly = vec![0.0; coefficients.len() * spacing + 1];
    poly[0] = 1.0;
    for (j, c) in coefficients.iter().enumerate() {
        poly[(j + 1) * spacing] = sign * c;
    }
    poly
}

/// Conditional residuals of an ARMA recursion on the differenced series.
///
/// Residuals before the first full AR window are fixed at zero.
fn conditional_residuals(w: &[f64], ar: &[f64], ma: &[f64], mean: f64) -> Vec<f64> {
    let start = ar.len();
    let mut residuals = vec![0.0; w.len()];
    for t in start..w.len() {
        let pred = one_step(w, &residuals, t, ar, ma, mean);
        residuals[t] = w[t] - pred;
    }
    residuals
}

/// One-step prediction of `w[t]` from everything before `t`.
fn one_step(w: &[f64], residuals: &[f64], t: usize, ar: &[f64], ma: &[f64], mean: f64) -> f64 {
    let mut pred = mean;
    for (k, a) in ar.iter().enumerate() {
        if *a != 0.0 && t > k {
            pred += a * (w[t - 1 - k] - mean);
        }
    }
    for (k, b) in ma.iter().enumerate() {
        if *b != 0.0 && t > k {
            pred += b * residuals[t - 1 - k];
        }
    }
    pred
}

/// SARIMA(p, d, q)(P, D, Q)\[s\] forecasting model.
///
/// The AR and MA polynomials are multiplicative in their seasonal and
/// non-seasonal parts. Parameters are estimated by conditional sum of
/// squares on the `(1 - B)^d (1 - B^s)^D` differenced series.
#[derive(Debug, Clone)]
pub struct SARIMA {
    params: HyperparameterSet,
    optimizer: NelderMeadConfig,
    coefficients: Coefficients,
    /// Training series on the original scale.
    history: Option<Vec<f64>>,
    differenced: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    sigma2: Option<f64>,
    iterations: usize,
}

impl SARIMA {
    /// Create a new SARIMA model.
    pub fn new(
        p: usize,
        d: usize,
        q: usize,
        cap_p: usize,
        cap_d: usize,
        cap_q: usize,
        s: usize,
    ) -> Self {
        Self::from_hyperparameters(HyperparameterSet {
            order: Order::new(p, d, q),
            seasonal_order: SeasonalOrder::new(cap_p, cap_d, cap_q, s),
        })
    }

    /// Create a model from a hyperparameter set.
    pub fn from_hyperparameters(params: HyperparameterSet) -> Self {
        Self {
            params,
            optimizer: NelderMeadConfig {
                max_iter: 5000,
                restarts: 2,
                ..Default::default()
            },
            coefficients: Coefficients::default(),
            history: None,
            differenced: None,
            fitted: None,
            residuals: None,
            sigma2: None,
            iterations: 0,
        }
    }

    /// The airline model SARIMA(0,1,1)(0,1,1)\[12\].
    pub fn airline() -> Self {
        Self::new(0, 1, 1, 0, 1, 1, 12)
    }

    /// Override the optimizer settings.
    pub fn with_optimizer(mut self, config: NelderMeadConfig) -> Self {
        self.optimizer = config;
        self
    }

    pub fn hyperparameters(&self) -> HyperparameterSet {
        self.params
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.coefficients.ar
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.coefficients.ma
    }

    pub fn seasonal_ar_coefficients(&self) -> &[f64] {
        &self.coefficients.seasonal_ar
    }

    pub fn seasonal_ma_coefficients(&self) -> &[f64] {
        &self.coefficients.seasonal_ma
    }

    /// Mean of the differenced series (zero for differenced models).
    pub fn mean(&self) -> f64 {
        self.coefficients.mean
    }

    /// Residual variance.
    pub fn sigma2(&self) -> Option<f64> {
        self.sigma2
    }

    /// Optimizer iterations spent in the last fit.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn differencing(&self) -> Vec<f64> {
        let o = &self.params.order;
        let so = &self.params.seasonal_order;
        differencing_polynomial(o.d, so.cap_d, self.params.period())
    }

    fn estimate(&mut self, w: &[f64]) -> Result<()> {
        let params = self.params;
        let period = params.period();
        let n_coef = params.num_params() - usize::from(params.has_mean());
        let mean = w.iter().sum::<f64>() / w.len() as f64;

        if n_coef == 0 {
            self.coefficients = Coefficients {
                mean: if params.has_mean() { mean } else { 0.0 },
                ..Default::default()
            };
            self.iterations = 0;
            return Ok(());
        }

        let mut initial = Vec::with_capacity(params.num_params());
        let mut bounds = Vec::with_capacity(params.num_params());
        if params.has_mean() {
            initial.push(mean);
            bounds.push((f64::NEG_INFINITY, f64::INFINITY));
        }
        for n in [
            params.order.p,
            params.order.q,
            params.seasonal_order.cap_p,
            params.seasonal_order.cap_q,
        ] {
            for i in 0..n {
                initial.push(0.1 / (i + 1) as f64);
                bounds.push((-COEFFICIENT_BOUND, COEFFICIENT_BOUND));
            }
        }

        // Scale the objective so the optimizer tolerance is relative.
        let spread = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / w.len() as f64;
        let scale = spread.max(f64::EPSILON);

        let result = nelder_mead(
            |point| {
                let c = Coefficients::unpack(&params, point);
                let ar = c.expanded_ar(period);
                let ma = c.expanded_ma(period);
                let start = ar.len();
                if w.len() <= start {
                    return f64::MAX;
                }
                let residuals = conditional_residuals(w, &ar, &ma, c.mean);
                let css: f64 = residuals[start..].iter().map(|e| e * e).sum();
                let value = css / ((w.len() - start) as f64 * scale);
                if value.is_finite() {
                    value
                } else {
                    f64::MAX
                }
            },
            &initial,
            Some(&bounds),
            self.optimizer,
        );

        self.iterations = result.iterations;
        if !result.converged || !result.optimal_value.is_finite() || result.optimal_value == f64::MAX
        {
            return Err(Error::NonConvergence {
                iterations: result.iterations,
            });
        }

        self.coefficients = Coefficients::unpack(&params, &result.optimal_point);
        Ok(())
    }

    fn calculate_fitted(&mut self, w: &[f64]) {
        let period = self.params.period();
        let ar = self.coefficients.expanded_ar(period);
        let ma = self.coefficients.expanded_ma(period);
        let start = ar.len();
        let residuals = conditional_residuals(w, &ar, &ma, self.coefficients.mean);

        let fitted: Vec<f64> = w
            .iter()
            .zip(residuals.iter())
            .enumerate()
            .map(|(t, (x, e))| if t < start { f64::NAN } else { x - e })
            .collect();

        let effective = &residuals[start..];
        if !effective.is_empty() {
            let sigma2 = effective.iter().map(|e| e * e).sum::<f64>() / effective.len() as f64;
            self.sigma2 = Some(sigma2);
        }

        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
    }
}

impl Default for SARIMA {
    fn default() -> Self {
        Self::airline()
    }
}

impl Forecaster for SARIMA {
    fn fit(&mut self, series: &ObservationSeries) -> Result<()> {
        self.params.validate()?;

        let values = series.values();
        let needed = self.params.min_observations();
        if values.len() < needed {
            return Err(Error::InsufficientData {
                needed,
                got: values.len(),
            });
        }

        let w = apply_differencing(values, &self.differencing());
        self.estimate(&w)?;
        self.calculate_fitted(&w);

        tracing::debug!(
            model = %self.params,
            observations = values.len(),
            iterations = self.iterations,
            sigma2 = self.sigma2.unwrap_or(f64::NAN),
            "fitted SARIMA"
        );

        self.history = Some(values.to_vec());
        self.differenced = Some(w);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let history = self.history.as_ref().ok_or(Error::FitRequired)?;
        let w = self.differenced.as_ref().ok_or(Error::FitRequired)?;
        let residuals = self.residuals.as_ref().ok_or(Error::FitRequired)?;

        if horizon == 0 {
            return Ok(vec![]);
        }

        let period = self.params.period();
        let ar = self.coefficients.expanded_ar(period);
        let ma = self.coefficients.expanded_ma(period);
        let mean = self.coefficients.mean;

        let mut extended = w.clone();
        let mut extended_residuals = residuals.clone();
        for _ in 0..horizon {
            let t = extended.len();
            let pred = one_step(&extended, &extended_residuals, t, &ar, &ma, mean);
            extended.push(pred);
            // Future shocks have zero expectation.
            extended_residuals.push(0.0);
        }

        Ok(integrate(&extended[w.len()..], history, &self.differencing()))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "SARIMA"
    }
}
