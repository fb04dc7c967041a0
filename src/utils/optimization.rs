//! Bounded Nelder-Mead minimization used for SARIMA parameter estimation.

use std::cmp::Ordering;

/// Result of a minimization run.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// The best point found.
    pub optimal_point: Vec<f64>,
    /// The objective value at the best point.
    pub optimal_value: f64,
    /// Total iterations across all runs.
    pub iterations: usize,
    /// Whether the final run converged.
    pub converged: bool,
}

/// Configuration for Nelder-Mead optimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations per run.
    pub max_iter: usize,
    /// Convergence tolerance on the spread of objective values and on the
    /// simplex diameter.
    pub tolerance: f64,
    /// Reflection coefficient.
    pub alpha: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Contraction coefficient.
    pub rho: f64,
    /// Shrinkage coefficient.
    pub sigma: f64,
    /// Initial simplex step size.
    pub initial_step: f64,
    /// Extra runs started from the best point when a run does not converge.
    pub restarts: usize,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
            restarts: 1,
        }
    }
}

/// Minimize `objective` starting from `initial`, clamping every trial point
/// into `bounds` when given.
///
/// A run that exhausts `max_iter` is restarted from its best point up to
/// `config.restarts` times with a fresh simplex.
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    if initial.is_empty() {
        return NelderMeadResult {
            optimal_point: vec![],
            optimal_value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let mut start = clamp(initial, bounds);
    let mut iterations = 0;
    let mut run = 0;

    loop {
        let mut simplex = Simplex::around(&start, bounds, config.initial_step, &objective);
        let (used, converged) = simplex.minimize(&objective, bounds, &config);
        iterations += used;

        let (point, value) = simplex.best();
        if converged || run >= config.restarts {
            return NelderMeadResult {
                optimal_point: point,
                optimal_value: value,
                iterations,
                converged,
            };
        }

        start = point;
        run += 1;
    }
}

struct Simplex {
    vertices: Vec<Vec<f64>>,
    values: Vec<f64>,
}

impl Simplex {
    fn around<F>(start: &[f64], bounds: Option<&[(f64, f64)]>, step: f64, objective: &F) -> Self
    where
        F: Fn(&[f64]) -> f64,
    {
        let mut vertices = Vec::with_capacity(start.len() + 1);
        vertices.push(start.to_vec());
        for i in 0..start.len() {
            let mut vertex = start.to_vec();
            vertex[i] += if start[i].abs() > 1e-10 {
                step * start[i].abs()
            } else {
                step
            };
            let mut vertex = clamp(&vertex, bounds);
            // A start point on the upper bound would otherwise collapse the simplex.
            if vertex[i] == start[i] {
                vertex[i] = clamp_one(start[i] - step, i, bounds);
            }
            vertices.push(vertex);
        }
        let values = vertices.iter().map(|v| objective(v)).collect();
        Self { vertices, values }
    }

    fn ranked(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by(|&a, &b| {
            self.values[a]
                .partial_cmp(&self.values[b])
                .unwrap_or(Ordering::Equal)
        });
        order
    }

    fn best(&self) -> (Vec<f64>, f64) {
        let idx = self.ranked()[0];
        (self.vertices[idx].clone(), self.values[idx])
    }

    fn centroid_without(&self, exclude: usize) -> Vec<f64> {
        let dims = self.vertices[0].len();
        let mut centroid = vec![0.0; dims];
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i == exclude {
                continue;
            }
            for (c, x) in centroid.iter_mut().zip(vertex) {
                *c += x;
            }
        }
        let count = (self.vertices.len() - 1) as f64;
        centroid.iter_mut().for_each(|c| *c /= count);
        centroid
    }

    fn replace(&mut self, idx: usize, vertex: Vec<f64>, value: f64) {
        self.vertices[idx] = vertex;
        self.values[idx] = value;
    }

    /// Run until convergence or `max_iter`; returns (iterations, converged).
    fn minimize<F>(
        &mut self,
        objective: &F,
        bounds: Option<&[(f64, f64)]>,
        config: &NelderMeadConfig,
    ) -> (usize, bool)
    where
        F: Fn(&[f64]) -> f64,
    {
        let n = self.vertices[0].len();

        for iteration in 1..=config.max_iter {
            let order = self.ranked();
            let (best, second_worst, worst) = (order[0], order[n - 1], order[n]);

            if self.values[worst] - self.values[best] < config.tolerance {
                return (iteration, true);
            }
            let centroid = self.centroid_without(worst);
            let diameter = self
                .vertices
                .iter()
                .map(|v| distance(v, &centroid))
                .fold(0.0, f64::max);
            if diameter < config.tolerance {
                return (iteration, true);
            }

            let reflected = clamp(&towards(&centroid, &self.vertices[worst], -config.alpha), bounds);
            let reflected_value = objective(&reflected);

            if reflected_value < self.values[best] {
                let expanded = clamp(&towards(&centroid, &reflected, config.gamma), bounds);
                let expanded_value = objective(&expanded);
                if expanded_value < reflected_value {
                    self.replace(worst, expanded, expanded_value);
                } else {
                    self.replace(worst, reflected, reflected_value);
                }
                continue;
            }

            if reflected_value < self.values[second_worst] {
                self.replace(worst, reflected, reflected_value);
                continue;
            }

            let (target, target_value) = if reflected_value < self.values[worst] {
                (reflected.clone(), reflected_value)
            } else {
                (self.vertices[worst].clone(), self.values[worst])
            };
            let contracted = clamp(&towards(&centroid, &target, config.rho), bounds);
            let contracted_value = objective(&contracted);
            if contracted_value < target_value {
                self.replace(worst, contracted, contracted_value);
                continue;
            }

            let anchor = self.vertices[best].clone();
            for i in 0..self.vertices.len() {
                if i == best {
                    continue;
                }
                let shrunk = clamp(&towards(&anchor, &self.vertices[i], config.sigma), bounds);
                let value = objective(&shrunk);
                self.replace(i, shrunk, value);
            }
        }

        (config.max_iter, false)
    }
}

/// `origin + factor * (point - origin)`; a negative factor reflects.
fn towards(origin: &[f64], point: &[f64], factor: f64) -> Vec<f64> {
    origin
        .iter()
        .zip(point)
        .map(|(o, p)| o + factor * (p - o))
        .collect()
}

fn clamp_one(x: f64, i: usize, bounds: Option<&[(f64, f64)]>) -> f64 {
    match bounds.and_then(|b| b.get(i)) {
        Some(&(lo, hi)) => x.clamp(lo, hi),
        None => x,
    }
}

fn clamp(point: &[f64], bounds: Option<&[(f64, f64)]>) -> Vec<f64> {
    point
        .iter()
        .enumerate()
        .map(|(i, &x)| clamp_one(x, i, bounds))
        .collect()
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn nelder_mead_quadratic_2d() {
        let result = nelder_mead(
            |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
            &[0.0, 0.0],
            None,
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert_relative_eq!(result.optimal_point[0], 2.0, epsilon = 1e-3);
        assert_relative_eq!(result.optimal_point[1], 3.0, epsilon = 1e-3);
        assert_relative_eq!(result.optimal_value, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn nelder_mead_respects_bounds() {
        // Unconstrained minimum at x = 2 lies outside the box.
        let result = nelder_mead(
            |x| (x[0] - 2.0).powi(2),
            &[0.0],
            Some(&[(-0.99, 0.99)]),
            NelderMeadConfig::default(),
        );

        assert!(result.converged);
        assert!(result.optimal_point[0] <= 0.99);
        assert_relative_eq!(result.optimal_point[0], 0.99, epsilon = 1e-3);
    }

    #[test]
    fn nelder_mead_restarts_when_iterations_run_out() {
        let config = NelderMeadConfig {
            max_iter: 5,
            restarts: 2,
            ..Default::default()
        };
        let result = nelder_mead(
            |x| (x[0] - 1.0).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2),
            &[-1.2, 1.0],
            None,
            config,
        );

        assert!(!result.converged);
        assert_eq!(result.iterations, 15);
    }

    #[test]
    fn nelder_mead_empty_input() {
        let result = nelder_mead(|_| 0.0, &[], None, NelderMeadConfig::default());
        assert!(!result.converged);
        assert!(result.optimal_point.is_empty());
    }

    #[test]
    fn nelder_mead_is_deterministic() {
        let f = |x: &[f64]| (x[0] - 0.3).powi(2) + (x[1] + 0.4).powi(4) + x[0] * x[1];
        let a = nelder_mead(f, &[0.1, 0.1], None, NelderMeadConfig::default());
        let b = nelder_mead(f, &[0.1, 0.1], None, NelderMeadConfig::default());
        assert_eq!(a.optimal_point, b.optimal_point);
        assert_eq!(a.iterations, b.iterations);
    }
}
