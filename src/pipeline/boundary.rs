//! Hand-off between transformed matrices and a model trainer
//!
//! A trainer consumes the training matrix without the identifier and with
//! the label split off. The feature columns must match the fitted schema
//! exactly, in name and order.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::error::TransformError;
use super::state::TransformState;
use super::values::column_names;

/// Check that a matrix carries exactly the fitted feature columns, in
/// order, after the identifier and optional target
pub fn verify_matrix_schema(matrix: &DataFrame, state: &TransformState) -> Result<()> {
    let found: Vec<String> = column_names(matrix)
        .into_iter()
        .filter(|name| name != state.id_column() && Some(name.as_str()) != state.target_column())
        .collect();
    let expected = state.output_columns();

    if found != expected {
        return Err(TransformError::SchemaMismatch { expected, found }.into());
    }
    Ok(())
}

/// Split a training matrix into features and 0/1 labels.
///
/// Rows with a missing label are kept; their label is `None`.
pub fn split_features_and_target(
    matrix: &DataFrame,
    state: &TransformState,
) -> Result<(DataFrame, Vec<Option<i32>>)> {
    verify_matrix_schema(matrix, state)?;

    let target = state
        .target_column()
        .context("Transform state has no target column configured")?;
    let labels: Vec<Option<i32>> = matrix
        .column(target)
        .with_context(|| format!("Matrix has no target column '{}'", target))?
        .cast(&DataType::Int32)?
        .i32()?
        .into_iter()
        .collect();

    let features = matrix.select(state.output_columns())?;
    Ok((features, labels))
}
