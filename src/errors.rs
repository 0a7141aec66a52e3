//! Error types for prompt construction and label encoding.

use thiserror::Error;

/// Prompt transformer error type.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A positional exemplar does not carry the id matching its position.
    #[error("few-shot exemplar at index {index} has id {found}, expected {index}")]
    ExemplarIdMismatch {
        /// Configured position in the dataset.
        index: usize,
        /// Id declared by the record at that position.
        found: i64,
    },
    /// A positional exemplar lies past the end of the dataset.
    #[error("few-shot exemplar index {index} is out of range for {len} records")]
    ExemplarOutOfRange {
        /// Configured position in the dataset.
        index: usize,
        /// Number of records in the dataset.
        len: usize,
    },
    /// No record carries the requested exemplar id.
    #[error("no record with id {0} for few-shot exemplar")]
    ExemplarNotFound(i64),
    /// Answer letter absent from the fitted label space.
    #[error("unknown label: {0:?}")]
    UnknownLabel(String),
    /// Label code outside the fitted label space.
    #[error("unknown label code: {0}")]
    UnknownCode(usize),
    /// Label encoder used before it was fitted.
    #[error("label encoder has not been fitted")]
    EncoderNotFitted,
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;
