//! Error types for fitting and applying the column transformer.

use thiserror::Error;

/// Errors raised while fitting or applying a [`TransformState`](super::TransformState).
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// A numeric reference column has no non-missing values, so no mean exists.
    #[error("Numeric column '{column}' has no non-missing values; cannot compute a fill value")]
    EmptyColumn { column: String },

    /// A configured column is absent from the dataset being processed.
    #[error("Column '{column}' not found in {dataset} dataset. Available columns: {available:?}")]
    UnknownColumn {
        column: String,
        dataset: String,
        available: Vec<String>,
    },

    /// A numeric column contains values that cannot be read as numbers.
    #[error("Numeric column '{column}' contains {count} non-numeric value(s)")]
    NonNumericColumn { column: String, count: usize },

    /// The identifier column repeats a value.
    #[error("Identifier column '{column}' contains {count} duplicate value(s)")]
    DuplicateIdentifier { column: String, count: usize },

    /// Two output columns would share a name.
    #[error("Output column '{name}' would be produced more than once")]
    DuplicateOutputColumn { name: String },

    /// The column configuration contradicts itself.
    #[error("Invalid column configuration: {0}")]
    InvalidColumnConfig(String),

    /// The target column is not 0/1 and no mapping was configured.
    #[error("Target column '{column}' must be binary (0/1) or have an event mapping. Found values: {values:?}")]
    NonBinaryTarget { column: String, values: Vec<String> },

    /// A matrix does not match the fitted output schema.
    #[error("Matrix schema does not match the fitted state: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

pub type TransformResult<T> = std::result::Result<T, TransformError>;
