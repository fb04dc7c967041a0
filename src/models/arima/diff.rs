//! Differencing utilities for SARIMA models.
//!
//! Regular and seasonal differencing are combined into a single lag
//! polynomial `(1 - B)^d (1 - B^s)^D`, stored as coefficients
//! `[c_0 = 1, c_1, ..., c_k]`. Applying it differences a series; inverting it
//! recursively integrates forecasts back onto the original scale.

/// Multiply two lag polynomials given by their coefficient vectors.
pub fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return vec![];
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Coefficients of `(1 - B)^d (1 - B^period)^seasonal_d`.
pub fn differencing_polynomial(d: usize, seasonal_d: usize, period: usize) -> Vec<f64> {
    let mut poly = vec![1.0];
    for _ in 0..d {
        poly = poly_mul(&poly, &[1.0, -1.0]);
    }
    if period > 0 {
        let mut seasonal = vec![0.0; period + 1];
        seasonal[0] = 1.0;
        seasonal[period] = -1.0;
        for _ in 0..seasonal_d {
            poly = poly_mul(&poly, &seasonal);
        }
    }
    poly
}

/// Apply a differencing polynomial to a series.
///
/// The output has `series.len() - (poly.len() - 1)` elements; an empty
/// vector is returned when the series is too short.
pub fn apply_differencing(series: &[f64], poly: &[f64]) -> Vec<f64> {
    let k = poly.len().saturating_sub(1);
    if series.len() <= k {
        return vec![];
    }
    (k..series.len())
        .map(|t| {
            poly.iter()
                .enumerate()
                .map(|(lag, c)| c * series[t - lag])
                .sum::<f64>()
        })
        .collect()
}

/// Integrate differenced forecasts back to the original scale.
///
/// `history` is the observed series the polynomial was applied to; each
/// forecast `w_t` becomes `y_t = w_t - sum_{k>=1} c_k * y_{t-k}`, reading
/// earlier values from the history and from already-integrated forecasts.
pub fn integrate(differenced: &[f64], history: &[f64], poly: &[f64]) -> Vec<f64> {
    let k = poly.len().saturating_sub(1);
    if k == 0 {
        return differenced.to_vec();
    }

    let mut extended = history.to_vec();
    extended.reserve(differenced.len());
    for &w in differenced {
        let t = extended.len();
        let mut y = w;
        for lag in 1..=k {
            if t >= lag {
                y -= poly[lag] * extended[t - lag];
            }
        }
        extended.push(y);
    }

    extended.split_off(history.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn polynomial_for_first_difference() {
        assert_eq!(differencing_polynomial(1, 0, 0), vec![1.0, -1.0]);
        assert_eq!(differencing_polynomial(2, 0, 0), vec![1.0, -2.0, 1.0]);
        assert_eq!(differencing_polynomial(0, 0, 12), vec![1.0]);
    }

    #[test]
    fn polynomial_for_airline_differencing() {
        let poly = differencing_polynomial(1, 1, 12);
        assert_eq!(poly.len(), 14);
        assert_eq!(poly[0], 1.0);
        assert_eq!(poly[1], -1.0);
        assert_eq!(poly[12], -1.0);
        assert_eq!(poly[13], 1.0);
        assert!(poly[2..12].iter().all(|&c| c == 0.0));
    }

    #[test]
    fn difference_first_order() {
        let series = vec![1.0, 3.0, 6.0, 10.0];
        let once = apply_differencing(&series, &differencing_polynomial(1, 0, 0));
        let twice = apply_differencing(&series, &differencing_polynomial(2, 0, 0));
        assert_eq!(once, vec![2.0, 3.0, 4.0]);
        assert_eq!(twice, vec![1.0, 1.0]);
        assert_eq!(apply_differencing(&series, &differencing_polynomial(0, 0, 0)), series);
    }

    #[test]
    fn seasonal_difference_removes_repeating_pattern() {
        let series: Vec<f64> = (0..24).map(|i| (i % 4) as f64 * 10.0 + i as f64).collect();
        let diff = apply_differencing(&series, &differencing_polynomial(0, 1, 4));
        assert_eq!(diff.len(), 20);
        assert!(diff.iter().all(|&x| (x - 4.0).abs() < 1e-12));
    }

    #[test]
    fn combined_polynomial_matches_sequential_differencing() {
        let series: Vec<f64> = (0..40)
            .map(|i| 5.0 + 0.3 * i as f64 + ((i * 7) % 12) as f64)
            .collect();
        let seasonal = apply_differencing(&series, &differencing_polynomial(0, 1, 12));
        let sequential = apply_differencing(&seasonal, &differencing_polynomial(1, 0, 0));
        let combined = apply_differencing(&series, &differencing_polynomial(1, 1, 12));

        assert_eq!(sequential.len(), combined.len());
        for (a, b) in sequential.iter().zip(combined.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-10);
        }
    }

    #[test]
    fn integrate_inverts_first_difference() {
        let history = vec![10.0, 12.0, 15.0];
        let poly = differencing_polynomial(1, 0, 0);
        let result = integrate(&[1.0, 2.0, -1.0], &history, &poly);
        assert_eq!(result, vec![16.0, 18.0, 17.0]);
    }

    #[test]
    fn integrate_inverts_seasonal_difference() {
        // Differenced forecasts of zero repeat the last observed cycle.
        let history = vec![1.0, 2.0, 3.0, 4.0, 1.5, 2.5, 3.5, 4.5];
        let poly = differencing_polynomial(0, 1, 4);
        let result = integrate(&[0.0; 6], &history, &poly);
        assert_eq!(result, vec![1.5, 2.5, 3.5, 4.5, 1.5, 2.5]);
    }

    #[test]
    fn integrate_round_trips_with_apply() {
        let series: Vec<f64> = (0..30).map(|i| (i as f64 * 0.7).sin() * 5.0 + i as f64).collect();
        let poly = differencing_polynomial(1, 1, 6);
        let split = 20;
        let tail_diff = apply_differencing(&series, &poly)[split - (poly.len() - 1)..].to_vec();
        let rebuilt = integrate(&tail_diff, &series[..split], &poly);

        for (a, b) in rebuilt.iter().zip(series[split..].iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn short_series_yields_empty_difference() {
        assert!(apply_differencing(&[1.0, 2.0], &differencing_polynomial(1, 1, 12)).is_empty());
    }

    #[test]
    fn poly_mul_handles_empty() {
        assert!(poly_mul(&[], &[1.0]).is_empty());
        assert_eq!(poly_mul(&[1.0, 1.0], &[1.0, -1.0]), vec![1.0, 0.0, -1.0]);
    }
}
