//! Dataset loading and exporting

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Field values read as missing in addition to empty fields
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Load a CSV dataset into memory.
///
/// `string_columns` (the identifier and categorical columns) are read as
/// text so codes like `01` or `1` are never reinterpreted as numbers.
/// Empty fields and the usual spreadsheet markers (`NA`, `N/A`, `null`, ...)
/// become nulls in every column.
/// Columns missing from the file are ignored here; the transformer reports them.
pub fn load_dataset(
    path: &Path,
    string_columns: &[&str],
    infer_schema_length: usize,
) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension != "csv" {
        anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv",
            extension
        );
    }

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let mut overwrite = Schema::default();
    for name in string_columns {
        overwrite.with_column((*name).into(), DataType::String);
    }
    let null_values = NullValues::AllColumns(
        MISSING_MARKERS
            .into_iter()
            .map(PlSmallStr::from_static)
            .collect(),
    );

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .with_dtype_overwrite(Some(Arc::new(overwrite)))
        .with_null_values(Some(null_values))
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    Ok(df)
}

/// Estimated in-memory size of a dataset in megabytes
pub fn estimated_memory_mb(df: &DataFrame) -> f64 {
    df.estimated_size() as f64 / (1024.0 * 1024.0)
}

/// Save a matrix as CSV.
///
/// The file is written next to its destination first and renamed into
/// place, so a failed export never leaves a truncated file behind.
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let staging = staging_path(path);
    let write_result = (|| -> Result<()> {
        let mut file = std::fs::File::create(&staging)
            .with_context(|| format!("Failed to create output file: {}", staging.display()))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        Ok(())
    })();

    if let Err(e) = write_result {
        let _ = std::fs::remove_file(&staging);
        return Err(e);
    }

    std::fs::rename(&staging, path)
        .with_context(|| format!("Failed to move output into place: {}", path.display()))?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output.csv");
    path.with_file_name(format!(".{}.partial", file_name))
}
