//! High-level API for hinge loss evaluation
//!
//! This module provides a user-friendly interface over the two loss
//! strategies, plus gradient checking and strategy comparison.
//!
//! # Quick Start
//!
//! ```rust
//! use svm_loss::api::HingeLoss;
//! use svm_loss::{Matrix, Strategy};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let w = Matrix::zeros(1, 3);
//! let x = Matrix::from_rows(&[vec![1.0], vec![1.0]])?;
//! let y = vec![0, 1];
//!
//! let output = HingeLoss::new()
//!     .with_reg(0.0)
//!     .with_strategy(Strategy::Naive)
//!     .compute(&w, &x, &y)?;
//!
//! assert_eq!(output.loss, 2.0);
//! assert_eq!(output.grad.shape(), w.shape());
//! # Ok(())
//! # }
//! ```

use crate::core::{LossOutput, Matrix, Result, Strategy};
use crate::utils::compare::{compare_strategies, StrategyComparison};
use crate::utils::gradcheck::{grad_check_sparse, GradCheckConfig, GradCheckReport};

/// Hinge loss evaluator with builder-style configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HingeLoss {
    reg: f64,
    strategy: Strategy,
}

impl HingeLoss {
    /// Create an evaluator with no regularization and the vectorized strategy
    pub fn new() -> Self {
        Self {
            reg: 0.0,
            strategy: Strategy::default(),
        }
    }

    /// Set the L2 regularization strength
    pub fn with_reg(mut self, reg: f64) -> Self {
        self.reg = reg;
        self
    }

    /// Select the computation strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn reg(&self) -> f64 {
        self.reg
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Compute the loss and gradient for weights `w`, batch `x` and labels `y`
    pub fn compute(&self, w: &Matrix, x: &Matrix, y: &[usize]) -> Result<LossOutput> {
        self.strategy
            .loss_function()
            .loss_and_grad(w, x, y, self.reg)
    }

    /// Compute only the loss value
    pub fn loss(&self, w: &Matrix, x: &Matrix, y: &[usize]) -> Result<f64> {
        self.strategy.loss_function().loss(w, x, y, self.reg)
    }

    /// Check the analytic gradient against centred finite differences
    pub fn check_gradient(
        &self,
        w: &Matrix,
        x: &Matrix,
        y: &[usize],
        config: &GradCheckConfig,
    ) -> Result<GradCheckReport> {
        let loss_fn = self.strategy.loss_function();
        let analytic = loss_fn.loss_and_grad(w, x, y, self.reg)?.grad;
        let f = |weights: &Matrix| loss_fn.loss(weights, x, y, self.reg);
        grad_check_sparse(f, w, &analytic, config)
    }

    /// Run both strategies and report how far apart they are
    pub fn compare(&self, w: &Matrix, x: &Matrix, y: &[usize]) -> Result<StrategyComparison> {
        compare_strategies(w, x, y, self.reg)
    }
}

impl Default for HingeLoss {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience functions with the plain `(W, X, y, reg) -> (loss, dW)` interface
pub mod quick {
    use super::*;

    /// Structured SVM loss and gradient, computed with explicit loops
    pub fn svm_loss_naive(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<(f64, Matrix)> {
        HingeLoss::new()
            .with_reg(reg)
            .with_strategy(Strategy::Naive)
            .compute(w, x, y)
            .map(LossOutput::into_parts)
    }

    /// Structured SVM loss and gradient, computed with matrix operations
    pub fn svm_loss_vectorized(
        w: &Matrix,
        x: &Matrix,
        y: &[usize],
        reg: f64,
    ) -> Result<(f64, Matrix)> {
        HingeLoss::new()
            .with_reg(reg)
            .with_strategy(Strategy::Vectorized)
            .compute(w, x, y)
            .map(LossOutput::into_parts)
    }
}
