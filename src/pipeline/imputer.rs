//! Missing value imputation
//!
//! Numeric columns are filled with the mean of their non-missing reference
//! values. Categorical columns are filled with a fixed sentinel category.

use super::error::{TransformError, TransformResult};

/// Sentinel category for missing categorical values
pub const MISSING_CATEGORY: &str = "missing";

/// A numeric value counts as missing when it is null, NaN or infinite
#[inline]
pub fn is_missing(value: Option<f64>) -> bool {
    !value.is_some_and(f64::is_finite)
}

/// Learn the numeric fill value: the mean of non-missing reference values
pub fn fit_numeric(column: &str, reference: &[Option<f64>]) -> TransformResult<f64> {
    let (sum, count) = reference
        .iter()
        .filter(|v| !is_missing(**v))
        .fold((0.0, 0usize), |(sum, count), v| {
            (sum + v.unwrap_or_default(), count + 1)
        });

    if count == 0 {
        return Err(TransformError::EmptyColumn {
            column: column.to_string(),
        });
    }

    Ok(sum / count as f64)
}

/// Replace every missing numeric value with `fill`
pub fn apply_numeric(values: &[Option<f64>], fill: f64) -> Vec<f64> {
    values
        .iter()
        .map(|v| match v {
            Some(x) if x.is_finite() => *x,
            _ => fill,
        })
        .collect()
}

/// The categorical fill value; always defined
pub fn fit_categorical() -> String {
    MISSING_CATEGORY.to_string()
}

/// Replace every missing categorical value with `fill`
pub fn apply_categorical(values: Vec<Option<String>>, fill: &str) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.unwrap_or_else(|| fill.to_string()))
        .collect()
}
