//! Reference hinge loss with explicit loops

use crate::core::{LossFunction, LossOutput, Matrix, Result};
use crate::loss::{validate_inputs, MARGIN};
use log::debug;

/// Multiclass hinge loss computed example by example, class by class
///
/// For every example `i` and wrong class `j`, the margin
/// `scores[j] - scores[y[i]] + 1` contributes to the loss when strictly positive,
/// and moves `X[i]` into column `j` of the gradient and out of column `y[i]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveHingeLoss;

impl NaiveHingeLoss {
    pub fn new() -> Self {
        Self
    }
}

impl LossFunction for NaiveHingeLoss {
    fn name(&self) -> &'static str {
        "naive"
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
            "naive hinge loss: N={}, D={}, C={}, reg={}",
            shape.n, shape.d, shape.c, reg
        );

        let mut grad = Matrix::zeros(shape.d, shape.c);
        let mut loss = 0.0;
        let mut scores = vec![0.0; shape.c];

        for (i, &label) in y.iter().enumerate() {
            let xi = x.row(i);

            for (j, score) in scores.iter_mut().enumerate() {
                *score = 0.0;
                for (p, &xv) in xi.iter().enumerate() {
                    *score += xv * w.get(p, j);
                }
            }
            let correct_class_score = scores[label];

            for (j, &score) in scores.iter().enumerate() {
                if j == label {
                    continue;
                }
                let margin = score - correct_class_score + MARGIN;
                if margin > 0.0 {
                    loss += margin;
                    for (p, &xv) in xi.iter().enumerate() {
                        grad.set(p, j, grad.get(p, j) + xv);
                        grad.set(p, label, grad.get(p, label) - xv);
                    }
                }
            }
        }

        let n = shape.n as f64;
        loss /= n;
        grad.scale_in_place(1.0 / n);

        loss += reg * w.frobenius_norm_squared();
        grad.add_scaled(reg, w)?;

        debug!("naive hinge loss: loss={loss:.6}");
        Ok(LossOutput::new(loss, grad))
    }
}
