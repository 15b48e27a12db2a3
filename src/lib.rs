//! Multiclass hinge loss (structured SVM) for linear classifiers
//!
//! Computes the loss and its gradient with respect to the weights, either with
//! explicit loops or with whole-matrix operations. Both forms agree to within
//! floating-point tolerance.

pub mod api;
pub mod core;
pub mod loss;
pub mod report;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{quick, HingeLoss};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{LossError, Result};
pub use crate::loss::{NaiveHingeLoss, VectorizedHingeLoss};
pub use crate::report::ComparisonReport;
pub use crate::utils::compare::StrategyComparison;
pub use crate::utils::gradcheck::{GradCheckConfig, GradCheckReport};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
