//! Error types for c45tree operations.
//!
//! Training and prediction errors come from the classifier itself; the
//! remaining variants wrap failures of the dataset loader, the exporters and
//! the run configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for c45tree operations.
///
/// # Examples
///
/// ```
/// use c45tree::error::TreeError;
///
/// let err = TreeError::dimension_mismatch("labels", 100, 99);
/// assert!(err.to_string().contains("labels=100"));
/// ```
#[derive(Debug, Error)]
pub enum TreeError {
    /// Training or prediction input violates a shape or value precondition.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// A target value cannot be used as a class label.
    #[error("Invalid label {value:?} at row {row}: labels must be nonnegative integers")]
    InvalidLabel {
        /// Raw cell content
        value: String,
        /// Zero-based data row (header excluded)
        row: usize,
    },

    /// Prediction was requested before a successful `fit`.
    #[error("Model not trained: call fit() before predict()")]
    ModelNotTrained,

    /// A named column is absent from a CSV header.
    #[error("Column '{name}' not found, available columns: {available:?}")]
    MissingColumn {
        /// Requested column
        name: String,
        /// Header as read from the file
        available: Vec<String>,
    },

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed TOML run configuration.
    #[error("Config error in {path}: {source}")]
    Config {
        /// Config file being parsed
        path: PathBuf,
        /// Parser error
        source: toml::de::Error,
    },

    /// The Graphviz executable could not produce an image.
    #[error("Render failed: {message}")]
    Render {
        /// Failure description
        message: String,
    },
}

impl TreeError {
    /// Create an invalid input error from any message.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error with descriptive context.
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidInput {
            message: format!("dimension mismatch: expected {context}={expected}, got {actual}"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, TreeError>;
