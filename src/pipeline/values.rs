//! Extracting raw column values from polars columns

use anyhow::Result;
use polars::prelude::*;

use super::error::TransformError;

/// Column names of a DataFrame as owned strings
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Convert a column to a Vec of Option<String>.
///
/// Floats are formatted with `{}` so `1.0` becomes `"1"`, matching the
/// text an integer column of the same data would produce.
pub fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.filter(|n| !n.is_nan()).map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            // For other types, try to cast to string
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

/// Convert a column to a Vec of Option<f64>, rejecting values that are
/// present but not numeric (e.g. "abc" in a string column).
pub fn column_to_f64_vec(col: &Column) -> Result<Vec<Option<f64>>> {
    let cast = col.cast(&DataType::Float64)?;

    let lost = cast.null_count().saturating_sub(col.null_count());
    if lost > 0 {
        return Err(TransformError::NonNumericColumn {
            column: col.name().to_string(),
            count: lost,
        }
        .into());
    }

    Ok(cast.f64()?.into_iter().collect())
}
