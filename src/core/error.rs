//! Error types for the hinge loss computation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LossError {
    #[error("Shape mismatch ({context}): expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid label at index {index}: {label} is outside [0, {num_classes})")]
    InvalidLabel {
        index: usize,
        label: usize,
        num_classes: usize,
    },

    #[error("Empty batch")]
    EmptyBatch,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, LossError>;
