//! Diagnostics for hinge loss implementations: random problems, gradient
//! checking and strategy comparison

use crate::core::{LossError, Matrix, Result};

/// Seeded random problem generation
pub mod random {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::StandardNormal;

    /// Default scale for random weights, small enough that every margin starts near 1
    pub const DEFAULT_WEIGHT_SCALE: f64 = 1e-4;

    /// Sample N(0, 1)
    pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        rng.sample(StandardNormal)
    }

    /// Gaussian matrix with standard deviation `scale`
    pub fn random_weights<R: Rng + ?Sized>(d: usize, c: usize, scale: f64, rng: &mut R) -> Matrix {
        let mut w = Matrix::zeros(d, c);
        for i in 0..d {
            for value in w.row_mut(i) {
                *value = standard_normal(rng) * scale;
            }
        }
        w
    }

    /// Batch of `n` standard Gaussian examples with `d` features
    pub fn random_batch<R: Rng + ?Sized>(n: usize, d: usize, rng: &mut R) -> Matrix {
        random_weights(n, d, 1.0, rng)
    }

    /// `n` labels drawn uniformly from `[0, c)`
    pub fn random_labels<R: Rng + ?Sized>(n: usize, c: usize, rng: &mut R) -> Vec<usize> {
        (0..n).map(|_| rng.gen_range(0..c)).collect()
    }

    /// Weights, batch and labels generated together from one seed
    #[derive(Debug, Clone)]
    pub struct RandomProblem {
        pub weights: Matrix,
        pub batch: Matrix,
        pub labels: Vec<usize>,
        pub seed: u64,
    }

    impl RandomProblem {
        /// Generate a problem with `n` examples, `d` features and `c` classes
        pub fn generate(n: usize, d: usize, c: usize, weight_scale: f64, seed: u64) -> Result<Self> {
            if n == 0 || d == 0 || c == 0 {
                return Err(LossError::InvalidParameter(format!(
                    "Problem dimensions must be positive, got N={n}, D={d}, C={c}"
                )));
            }
            if !weight_scale.is_finite() || weight_scale < 0.0 {
                return Err(LossError::InvalidParameter(format!(
                    "Weight scale must be finite and non-negative, got: {weight_scale}"
                )));
            }

            let mut rng = StdRng::seed_from_u64(seed);
            let weights = random_weights(d, c, weight_scale, &mut rng);
            let batch = random_batch(n, d, &mut rng);
            let labels = random_labels(n, c, &mut rng);

            Ok(Self {
                weights,
                batch,
                labels,
                seed,
            })
        }
    }
}

/// Numerical gradient checking by centred finite differences
pub mod gradcheck {
    use super::*;
    use log::debug;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use serde::{Deserialize, Serialize};

    /// Configuration for sparse gradient checks
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GradCheckConfig {
        /// Number of randomly sampled coordinates to check
        pub num_checks: usize,
        /// Finite difference step h
        pub step: f64,
        /// Seed for coordinate sampling
        pub seed: u64,
    }

    impl Default for GradCheckConfig {
        fn default() -> Self {
            Self {
                num_checks: 10,
                step: 1e-5,
                seed: 0,
            }
        }
    }

    /// Result of checking a single weight coordinate
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct GradCheckEntry {
        pub row: usize,
        pub col: usize,
        pub numerical: f64,
        pub analytic: f64,
        pub relative_error: f64,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct GradCheckReport {
        pub entries: Vec<GradCheckEntry>,
    }

    impl GradCheckReport {
        pub fn max_relative_error(&self) -> f64 {
            self.entries
                .iter()
                .map(|e| e.relative_error)
                .fold(0.0, f64::max)
        }

        /// True when every checked coordinate is within `threshold`
        pub fn passed(&self, threshold: f64) -> bool {
            self.entries.iter().all(|e| e.relative_error <= threshold)
        }
    }

    /// Centred difference `(f(W + h) - f(W - h)) / 2h` at one coordinate
    pub fn numerical_gradient_at<F>(f: F, w: &Matrix, row: usize, col: usize, h: f64) -> Result<f64>
    where
        F: Fn(&Matrix) -> Result<f64>,
    {
        if row >= w.rows() || col >= w.cols() {
            return Err(LossError::InvalidParameter(format!(
                "Coordinate ({row}, {col}) is outside a {}x{} matrix",
                w.rows(),
                w.cols()
            )));
        }

        let original = w.get(row, col);
        let mut perturbed = w.clone();

        perturbed.set(row, col, original + h);
        let plus = f(&perturbed)?;
        perturbed.set(row, col, original - h);
        let minus = f(&perturbed)?;

        Ok((plus - minus) / (2.0 * h))
    }

    /// Compare `analytic` with numerical gradients at randomly sampled coordinates
    pub fn grad_check_sparse<F>(
        f: F,
        w: &Matrix,
        analytic: &Matrix,
        config: &GradCheckConfig,
    ) -> Result<GradCheckReport>
    where
        F: Fn(&Matrix) -> Result<f64>,
    {
        if analytic.shape() != w.shape() {
            return Err(LossError::ShapeMismatch {
                context: "analytic gradient vs weights",
                expected: w.rows() * w.cols(),
                actual: analytic.rows() * analytic.cols(),
            });
        }
        if w.rows() == 0 || w.cols() == 0 {
            return Err(LossError::InvalidParameter(
                "Cannot check the gradient of an empty weight matrix".to_string(),
            ));
        }
        if !config.step.is_finite() || config.step <= 0.0 {
            return Err(LossError::InvalidParameter(format!(
                "Finite difference step must be positive, got: {}",
                config.step
            )));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut entries = Vec::with_capacity(config.num_checks);

        for _ in 0..config.num_checks {
            let row = rng.gen_range(0..w.rows());
            let col = rng.gen_range(0..w.cols());

            let numerical = numerical_gradient_at(&f, w, row, col, config.step)?;
            let expected = analytic.get(row, col);
            let relative_error = compare::relative_error(numerical, expected);

            debug!(
                "gradcheck ({row}, {col}): numerical {numerical:.6e} analytic {expected:.6e} relative error {relative_error:.3e}"
            );
            entries.push(GradCheckEntry {
                row,
                col,
                numerical,
                analytic: expected,
                relative_error,
            });
        }

        Ok(GradCheckReport { entries })
    }
}

/// Side-by-side evaluation of the naive and vectorized strategies
pub mod compare {
    use super::*;
    use crate::core::LossFunction;
    use crate::loss::{NaiveHingeLoss, VectorizedHingeLoss};
    use log::info;
    use std::time::{Duration, Instant};

    /// `|a - b| / (|a| + |b|)` with the denominator floored at 1e-8
    pub fn relative_error(a: f64, b: f64) -> f64 {
        (a - b).abs() / (a.abs() + b.abs()).max(1e-8)
    }

    /// Differences and timings between the two strategies on one problem
    #[derive(Debug, Clone)]
    pub struct StrategyComparison {
        pub naive_loss: f64,
        pub vectorized_loss: f64,
        /// Absolute loss difference
        pub loss_difference: f64,
        /// Frobenius norm of the gradient difference
        pub gradient_difference: f64,
        /// Largest element-wise gradient difference
        pub max_gradient_difference: f64,
        /// Largest absolute entry of the naive gradient
        pub gradient_scale: f64,
        pub naive_time: Duration,
        pub vectorized_time: Duration,
    }

    impl StrategyComparison {
        /// True when loss and gradient agree within `tolerance`, read as absolute
        /// for values up to 1 and relative above
        pub fn agrees(&self, tolerance: f64) -> bool {
            self.loss_difference <= tolerance * self.naive_loss.abs().max(1.0)
                && self.max_gradient_difference <= tolerance * self.gradient_scale.max(1.0)
        }

        /// Naive time divided by vectorized time
        pub fn speedup(&self) -> f64 {
            let vectorized = self.vectorized_time.as_secs_f64();
            if vectorized == 0.0 {
                f64::INFINITY
            } else {
                self.naive_time.as_secs_f64() / vectorized
            }
        }
    }

    /// Run both strategies on the same inputs and measure how far apart they are
    pub fn compare_strategies(
        w: &Matrix,
        x: &Matrix,
        y: &[usize],
        reg: f64,
    ) -> Result<StrategyComparison> {
        let start = Instant::now();
        let naive = NaiveHingeLoss::new().loss_and_grad(w, x, y, reg)?;
        let naive_time = start.elapsed();

        let start = Instant::now();
        let vectorized = VectorizedHingeLoss::new().loss_and_grad(w, x, y, reg)?;
        let vectorized_time = start.elapsed();

        let mut difference = naive.grad.clone();
        difference.add_scaled(-1.0, &vectorized.grad)?;

        let comparison = StrategyComparison {
            naive_loss: naive.loss,
            vectorized_loss: vectorized.loss,
            loss_difference: (naive.loss - vectorized.loss).abs(),
            gradient_difference: difference.frobenius_norm(),
            max_gradient_difference: naive.grad.max_abs_diff(&vectorized.grad)?,
            gradient_scale: naive.grad.as_slice().iter().map(|v| v.abs()).fold(0.0, f64::max),
            naive_time,
            vectorized_time,
        };

        info!(
            "naive loss {:.6e} in {:?}, vectorized loss {:.6e} in {:?}",
            comparison.naive_loss, naive_time, comparison.vectorized_loss, vectorized_time
        );
        Ok(comparison)
    }
}
