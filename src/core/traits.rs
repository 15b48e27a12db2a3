//! Core traits for the hinge loss implementation

use crate::core::{LossOutput, Matrix, Result};

/// Loss function over a linear classifier `scores = X * W`
///
/// Implementations are pure: they never mutate their inputs and allocate a
/// fresh gradient on every call, so one instance can be shared across threads.
pub trait LossFunction: Send + Sync {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Compute the loss and its gradient with respect to `w`
    ///
    /// * `w` - weights, shape (D, C)
    /// * `x` - minibatch, shape (N, D)
    /// * `y` - labels, length N, each in `[0, C)`
    /// * `reg` - L2 regularization strength
    fn loss_and_grad(&self, w: &Matrix, x: &Matrix, y: &[usize], reg: f64)
        -> Result<LossOutput>;

    /// Compute only the loss value
    fn loss(&self, w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<f64> {
        self.loss_and_grad(w, x, y, reg).map(|output| output.loss)
    }
}
