//! Hinge loss expressed as whole-matrix operations

use crate::core::{LossFunction, LossOutput, Matrix, Result};
use crate::loss::{validate_inputs, MARGIN};
use log::{debug, trace};

/// Multiclass hinge loss computed from the full score matrix
///
/// `S = X * W`, margins `M = max(S - S[i, y[i]] + 1, 0)` with the correct-class
/// slot zeroed, and the gradient `X^T * I / N + reg * W` where `I` marks positive
/// margins and carries minus their row count in the correct-class slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorizedHingeLoss;

impl VectorizedHingeLoss {
    pub fn new() -> Self {
        Self
    }
}

impl LossFunction for VectorizedHingeLoss {
    fn name(&self) -> &'static str {
        "vectorized"
    }

    fn loss_and_grad(
        &self,
        w: &Matrix,
        x: &Matrix,
        y: &[usize],
        reg: f64,
    ) -> Result<LossOutput> {
        let shape = validate_inputs(w, x, y, reg)?;
        debug!(
            "vectorized hinge loss: N={}, D={}, C={}, reg={}",
            shape.n, shape.d, shape.c, reg
        );

        let mut margins = x.matmul(w)?;
        hinge_margins(&mut margins, y);

        let n = shape.n as f64;
        let loss = margins.sum() / n + reg * w.frobenius_norm_squared();

        let indicator = margin_indicator(&margins, y);
        trace!("indicator matrix: {indicator:?}");

        let mut grad = x.transpose_matmul(&indicator)?;
        grad.scale_in_place(1.0 / n);
        grad.add_scaled(reg, w)?;

        debug!("vectorized hinge loss: loss={loss:.6}");
        Ok(LossOutput::new(loss, grad))
    }
}

/// Turn a score matrix into clipped hinge margins in place
fn hinge_margins(scores: &mut Matrix, y: &[usize]) {
    for (i, &label) in y.iter().enumerate() {
        let row = scores.row_mut(i);
        let correct_class_score = row[label];
        for value in row.iter_mut() {
            *value = (*value - correct_class_score + MARGIN).max(0.0);
        }
        row[label] = 0.0;
    }
}

/// Indicator of positive margins, with the correct-class slot holding minus the
/// number of positive margins in that row
fn margin_indicator(margins: &Matrix, y: &[usize]) -> Matrix {
    let mut indicator = margins.map(|m| if m > 0.0 { 1.0 } else { 0.0 });
    for (i, &label) in y.iter().enumerate() {
        let row = indicator.row_mut(i);
        let positive: f64 = row.iter().sum();
        row[label] = -positive;
    }
    indicator
}
