//! Multiclass hinge loss (structured SVM) implementations

pub mod naive;
pub mod validate;
pub mod vectorized;

pub use self::naive::*;
pub use self::validate::*;
pub use self::vectorized::*;

use crate::core::{LossFunction, Strategy};

/// Margin by which the correct class score must beat every other class score
pub const MARGIN: f64 = 1.0;

impl Strategy {
    /// The loss implementation backing this strategy
    pub fn loss_function(self) -> Box<dyn LossFunction> {
        match self {
            Strategy::Naive => Box::new(NaiveHingeLoss::new()),
            Strategy::Vectorized => Box::new(VectorizedHingeLoss::new()),
        }
    }
}
