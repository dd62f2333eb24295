//! Target label handling
//!
//! The target is held aside during transformation and re-attached as a
//! 0/1 column. Labels that are not already binary ("Yes"/"No", "churned")
//! need an explicit event / non-event mapping.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::TransformError;
use super::values::column_to_string_vec;

/// Mapping configuration for converting target column values to binary 0/1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetMapping {
    /// Value that maps to 1 (event)
    pub event_value: String,
    /// Value that maps to 0 (non-event)
    pub non_event_value: String,
}

impl TargetMapping {
    pub fn new(event_value: String, non_event_value: String) -> Self {
        Self {
            event_value,
            non_event_value,
        }
    }

    /// 1 for the event, 0 for the non-event, `None` for anything else
    fn label(&self, value: &str) -> Option<i32> {
        if value == self.event_value {
            Some(1)
        } else if value == self.non_event_value {
            Some(0)
        } else {
            None
        }
    }
}

/// Labels of a numeric column holding only 0, 1 and nulls; `None` otherwise
fn binary_labels(col: &Column) -> Result<Option<Vec<Option<i32>>>> {
    if !col.dtype().is_primitive_numeric() {
        return Ok(None);
    }

    let values = col.cast(&DataType::Float64)?;
    let mut labels = Vec::with_capacity(values.len());
    for value in values.f64()? {
        match value {
            None => labels.push(None),
            Some(v) if v == 0.0 => labels.push(Some(0)),
            Some(v) if v == 1.0 => labels.push(Some(1)),
            Some(_) => return Ok(None),
        }
    }
    Ok(Some(labels))
}

/// Sorted distinct non-null values, for error messages
fn distinct_values(col: &Column) -> Result<Vec<String>> {
    let values: BTreeSet<String> = column_to_string_vec(col)?.into_iter().flatten().collect();
    Ok(values.into_iter().collect())
}

/// Build the 0/1 label column that is re-attached to the output matrix.
///
/// Numeric 0/1 targets are used as-is. Anything else goes through
/// `mapping`, or fails with `NonBinaryTarget` when there is none.
pub fn binary_target_column(
    df: &DataFrame,
    target: &str,
    mapping: Option<&TargetMapping>,
) -> Result<Column> {
    let col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    if col.len() > 0 && col.null_count() == col.len() {
        anyhow::bail!("Target column '{}' contains only null values", target);
    }

    let labels = match mapping {
        Some(mapping) => {
            let labels: Vec<Option<i32>> = column_to_string_vec(col)?
                .iter()
                .map(|v| v.as_deref().and_then(|s| mapping.label(s)))
                .collect();
            let unmapped = labels.iter().filter(|v| v.is_none()).count();
            if unmapped > 0 {
                eprintln!(
                    "Warning: Target column '{}' has {} value(s) matching neither '{}' nor '{}'; left empty",
                    target, unmapped, mapping.event_value, mapping.non_event_value
                );
            }
            labels
        }
        None => match binary_labels(col)? {
            Some(labels) => labels,
            None => {
                return Err(TransformError::NonBinaryTarget {
                    column: target.to_string(),
                    values: distinct_values(col)?,
                }
                .into())
            }
        },
    };

    Ok(Column::new(target.into(), labels))
}
