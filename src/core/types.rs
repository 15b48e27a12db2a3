//! Core type definitions for the hinge loss

use crate::core::{LossError, Result};

/// Dense real matrix stored in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// Create a matrix with every entry set to `value`
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wrap a row-major buffer, checking its length against the shape
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(LossError::ShapeMismatch {
                context: "buffer length vs rows * cols",
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from nested rows; all rows must have the same length
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for row in rows {
            if row.len() != cols {
                return Err(LossError::ShapeMismatch {
                    context: "row length",
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Get the entry at (row, col)
    ///
    /// # Panics
    /// Panics if the position is out of bounds
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "Matrix index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Set the entry at (row, col)
    ///
    /// # Panics
    /// Panics if the position is out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "Matrix index out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Borrow one row as a slice
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Borrow one row mutably
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Underlying row-major buffer
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Matrix product `self * other`
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(LossError::ShapeMismatch {
                context: "matmul inner dimension",
                expected: self.cols,
                actual: other.rows,
            });
        }

        let mut out = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            let lhs = self.row(i);
            let out_row = out.row_mut(i);
            for (p, &a) in lhs.iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                for (o, &b) in out_row.iter_mut().zip(other.row(p)) {
                    *o += a * b;
                }
            }
        }
        Ok(out)
    }

    /// Product `selfᵗ * other` without materialising the transpose
    pub fn transpose_matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.rows != other.rows {
            return Err(LossError::ShapeMismatch {
                context: "transpose_matmul shared rows",
                expected: self.rows,
                actual: other.rows,
            });
        }

        let mut out = Matrix::zeros(self.cols, other.cols);
        for i in 0..self.rows {
            let rhs = other.row(i);
            for (p, &a) in self.row(i).iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                for (o, &b) in out.row_mut(p).iter_mut().zip(rhs) {
                    *o += a * b;
                }
            }
        }
        Ok(out)
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    /// Return a copy multiplied by `factor`
    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|v| v * factor)
    }

    pub fn scale_in_place(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|v| *v *= factor);
    }

    /// `self += alpha * other`
    pub fn add_scaled(&mut self, alpha: f64, other: &Matrix) -> Result<()> {
        self.check_same_shape(other)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += alpha * b;
        }
        Ok(())
    }

    /// Sum of all entries
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Squared Frobenius norm: sum of squared entries
    pub fn frobenius_norm_squared(&self) -> f64 {
        self.data.iter().map(|&v| v * v).sum()
    }

    pub fn frobenius_norm(&self) -> f64 {
        self.frobenius_norm_squared().sqrt()
    }

    /// Apply `f` to every entry
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Largest element-wise absolute difference between two same-shaped matrices
    pub fn max_abs_diff(&self, other: &Matrix) -> Result<f64> {
        self.check_same_shape(other)?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        if self.rows != other.rows {
            return Err(LossError::ShapeMismatch {
                context: "row count",
                expected: self.rows,
                actual: other.rows,
            });
        }
        if self.cols != other.cols {
            return Err(LossError::ShapeMismatch {
                context: "column count",
                expected: self.cols,
                actual: other.cols,
            });
        }
        Ok(())
    }
}

/// Validated dimensions of one loss evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchShape {
    /// Number of examples in the batch
    pub n: usize,
    /// Feature dimensionality
    pub d: usize,
    /// Number of classes
    pub c: usize,
}

/// Loss value and gradient with respect to the weights
#[derive(Debug, Clone, PartialEq)]
pub struct LossOutput {
    /// Averaged hinge loss plus the L2 penalty
    pub loss: f64,
    /// Gradient of `loss` with respect to W, same shape as W
    pub grad: Matrix,
}

impl LossOutput {
    pub fn new(loss: f64, grad: Matrix) -> Self {
        Self { loss, grad }
    }

    /// Split into the `(loss, dW)` tuple form
    pub fn into_parts(self) -> (f64, Matrix) {
        (self.loss, self.grad)
    }
}

/// Computation strategy for the hinge loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Explicit loops over examples and classes
    Naive,
    /// Whole-matrix operations
    #[default]
    Vectorized,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Naive => write!(f, "naive"),
            Strategy::Vectorized => write!(f, "vectorized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_from_rows() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
            .expect("valid rows");
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.get(2, 1), 6.0);
        assert_eq!(m.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_matrix_from_rows_ragged() {
        let result = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            result,
            Err(LossError::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_matrix_from_vec_length_check() {
        assert!(Matrix::from_vec(2, 3, vec![0.0; 6]).is_ok());
        assert!(Matrix::from_vec(2, 3, vec![0.0; 5]).is_err());
    }

    #[test]
    fn test_matmul() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![5.0, 6.0, 7.0], vec![8.0, 9.0, 10.0]]).unwrap();
        let c = a.matmul(&b).unwrap();

        assert_eq!(c.shape(), (2, 3));
        assert_eq!(c.row(0), &[21.0, 24.0, 27.0]);
        assert_eq!(c.row(1), &[47.0, 54.0, 61.0]);
    }

    #[test]
    fn test_matmul_shape_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        assert!(a.matmul(&b).is_err());
    }

    #[test]
    fn test_transpose_matmul_matches_explicit_transpose() {
        let a = Matrix::from_rows(&[vec![1.0, -2.0], vec![0.5, 3.0], vec![4.0, 0.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![1.0, 0.0], vec![2.0, -1.0], vec![0.0, 3.0]]).unwrap();

        let fused = a.transpose_matmul(&b).unwrap();
        let explicit = a.transpose().matmul(&b).unwrap();
        assert_eq!(fused, explicit);
        assert_eq!(fused.shape(), (2, 2));
    }

    #[test]
    fn test_norms_and_sum() {
        let m = Matrix::from_rows(&[vec![3.0, 0.0], vec![0.0, -4.0]]).unwrap();
        assert_eq!(m.sum(), -1.0);
        assert_eq!(m.frobenius_norm_squared(), 25.0);
        assert_eq!(m.frobenius_norm(), 5.0);
    }

    #[test]
    fn test_add_scaled_and_scale() {
        let mut a = Matrix::filled(2, 2, 1.0);
        let b = Matrix::filled(2, 2, 2.0);
        a.add_scaled(0.5, &b).unwrap();
        assert_eq!(a, Matrix::filled(2, 2, 2.0));

        a.scale_in_place(0.25);
        assert_eq!(a, Matrix::filled(2, 2, 0.5));
        assert_eq!(a.scale(4.0), Matrix::filled(2, 2, 2.0));

        assert!(a.add_scaled(1.0, &Matrix::zeros(2, 3)).is_err());
    }

    #[test]
    fn test_max_abs_diff() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![1.5, 1.0]]).unwrap();
        assert_eq!(a.max_abs_diff(&b).unwrap(), 1.0);
    }

    #[test]
    #[should_panic(expected = "Matrix index out of bounds")]
    fn test_get_out_of_bounds() {
        Matrix::zeros(2, 2).get(2, 0);
    }

    #[test]
    fn test_strategy_default_and_display() {
        assert_eq!(Strategy::default(), Strategy::Vectorized);
        assert_eq!(Strategy::Naive.to_string(), "naive");
        assert_eq!(Strategy::Vectorized.to_string(), "vectorized");
    }

    #[test]
    fn test_loss_output_into_parts() {
        let output = LossOutput::new(1.5, Matrix::zeros(1, 2));
        let (loss, grad) = output.into_parts();
        assert_eq!(loss, 1.5);
        assert_eq!(grad.shape(), (1, 2));
    }
}
