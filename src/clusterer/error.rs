use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EcmError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    #[error("Model is empty: no point has been added yet")]
    EmptyModel,
}
