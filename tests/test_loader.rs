//! Unit tests for dataset loading and exporting

use polars::prelude::*;
use std::io::Write;
use tabprep::pipeline::{column_names, load_dataset, save_dataset};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,c").unwrap();
    writeln!(file, "1,2,3").unwrap();
    writeln!(file, "4,5,6").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, &[], 100).unwrap();

    assert_eq!(df.shape(), (2, 3));
    assert_eq!(column_names(&df), vec!["a", "b", "c"]);
}

#[test]
fn test_string_columns_keep_codes_as_text() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = common::write_csv(
        temp_dir.path(),
        "codes.csv",
        "ID,HasCrCard,Balance\n001,1,10.5\n002,0,20.0\n",
    );

    let df = load_dataset(&csv_path, &["ID", "HasCrCard"], 100).unwrap();

    assert_eq!(df.column("ID").unwrap().dtype(), &DataType::String);
    assert_eq!(df.column("HasCrCard").unwrap().dtype(), &DataType::String);
    assert_eq!(df.column("Balance").unwrap().dtype(), &DataType::Float64);

    let ids: Vec<Option<&str>> = df.column("ID").unwrap().str().unwrap().into_iter().collect();
    assert_eq!(ids, vec![Some("001"), Some("002")]);
}

#[test]
fn test_string_columns_absent_from_file_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = common::write_csv(temp_dir.path(), "small.csv", "ID,Age\n1,30\n");

    let df = load_dataset(&csv_path, &["ID", "Geography"], 100).unwrap();
    assert_eq!(column_names(&df), vec!["ID", "Age"]);
}

#[test]
fn test_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.parquet");
    std::fs::write(&path, b"not really parquet").unwrap();

    let err = load_dataset(&path, &[], 100).unwrap_err();
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn test_missing_file_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.csv");

    assert!(load_dataset(&path, &[], 100).is_err());
}

#[test]
fn test_save_dataset_creates_directories() {
    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("nested/deeper/out.csv");

    let mut df = df! {
        "id" => ["a", "b"],
        "x" => [1.5f64, -0.5],
    }
    .unwrap();
    save_dataset(&mut df, &out_path).unwrap();

    assert!(out_path.exists());
    assert!(!temp_dir.path().join("nested/deeper/.out.csv.partial").exists());

    let back = common::read_output(&out_path);
    assert_eq!(back.shape(), (2, 2));
    assert_eq!(common::f64_column(&back, "x"), vec![1.5, -0.5]);
}

#[test]
fn test_save_dataset_overwrites_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("out.csv");
    std::fs::write(&out_path, "stale,content\n1,2\n3,4\n5,6\n").unwrap();

    let mut df = df! { "id" => ["a"] }.unwrap();
    save_dataset(&mut df, &out_path).unwrap();

    let text = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(text, "id\na\n");
}

#[test]
fn test_missing_markers_read_as_null() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = common::write_csv(
        temp_dir.path(),
        "markers.csv",
        "ID,Age,Geography\n1,NA,France\n2,30,N/A\n3,,null\n4,41.5,Spain\n",
    );

    let df = load_dataset(&csv_path, &["ID", "Geography"], 100).unwrap();

    // Numeric column stays numeric with the markers as nulls
    let age = df.column("Age").unwrap();
    assert!(age.dtype().is_primitive_numeric());
    assert_eq!(age.null_count(), 2);

    // Categorical column gets nulls, not literal "NA"/"null" strings
    let geography: Vec<Option<&str>> = df
        .column("Geography")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(geography, vec![Some("France"), None, None, Some("Spain")]);
}
