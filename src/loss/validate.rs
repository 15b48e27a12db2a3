//! Precondition checks shared by every hinge loss strategy

use crate::core::{BatchShape, LossError, Matrix, Result};

/// Check that `w`, `x`, `y` and `reg` describe a well-formed problem
///
/// Returns the problem dimensions on success. Every check runs before any
/// arithmetic, so a failing call never does partial work.
pub fn validate_inputs(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<BatchShape> {
    let (d, c) = w.shape();
    let n = x.rows();

    if x.cols() != d {
        return Err(LossError::ShapeMismatch {
            context: "batch columns vs weight rows",
            expected: d,
            actual: x.cols(),
        });
    }

    if y.len() != n {
        return Err(LossError::ShapeMismatch {
            context: "labels vs batch rows",
            expected: n,
            actual: y.len(),
        });
    }

    if n == 0 {
        return Err(LossError::EmptyBatch);
    }

    if c == 0 {
        return Err(LossError::ShapeMismatch {
            context: "weight columns (classes)",
            expected: 1,
            actual: 0,
        });
    }

    if let Some((index, &label)) = y.iter().enumerate().find(|(_, &label)| label >= c) {
        return Err(LossError::InvalidLabel {
            index,
            label,
            num_classes: c,
        });
    }

    for (name, matrix) in [("weights", w), ("batch", x)] {
        if let Some(position) = matrix.as_slice().iter().position(|v| !v.is_finite()) {
            return Err(LossError::InvalidParameter(format!(
                "{name} entry ({}, {}) is not finite",
                position / matrix.cols(),
                position % matrix.cols()
            )));
        }
    }

    if !reg.is_finite() || reg < 0.0 {
        return Err(LossError::InvalidParameter(format!(
            "Regularization strength must be finite and non-negative, got: {reg}"
        )));
    }

    Ok(BatchShape { n, d, c })
}
