//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use tabprep::pipeline::{ColumnConfig, PipelineConfig};

pub const TRAIN_CSV: &str = "\
ID,CreditScore,Geography,Gender,Age,Tenure,Balance,NumOfProducts,HasCrCard,IsActiveMember,EstimatedSalary,Exited
1,619,France,Female,42,2,0.0,1,1,1,101348.88,1
2,608,Spain,Female,41,1,83807.86,1,0,1,112542.58,0
3,502,France,Female,42,8,159660.8,3,1,0,113931.57,1
4,699,France,Female,39,1,0.0,2,0,0,93826.63,0
5,850,Spain,Female,43,2,125510.82,1,1,1,79084.1,0
6,645,Spain,Male,44,8,113755.78,2,1,0,149756.71,1
7,822,France,Male,50,7,0.0,2,1,1,10062.8,0
8,376,Germany,Female,29,4,115046.74,4,1,0,119346.88,1
9,501,France,Male,44,4,142051.07,2,0,1,74940.5,0
10,684,France,Male,,2,134603.88,1,1,1,71725.73,0
";

/// Validation rows: Geography "Italy" was never seen during training
pub const VALIDATION_CSV: &str = "\
ID,CreditScore,Geography,Gender,Age,Tenure,Balance,NumOfProducts,HasCrCard,IsActiveMember,EstimatedSalary,Exited
11,528,France,Male,31,6,102016.72,2,0,0,80181.12,0
12,497,Italy,Male,24,3,0.0,2,1,0,76390.01,0
13,476,France,Female,34,10,,2,1,0,26260.98,1
";

/// Scoring rows carry no target column
pub const SCORE_CSV: &str = "\
ID,CreditScore,Geography,Gender,Age,Tenure,Balance,NumOfProducts,HasCrCard,IsActiveMember,EstimatedSalary
21,549,Spain,Female,25,5,0.0,2,0,0,190857.79
22,635,Germany,Female,35,7,0.0,2,1,1,65951.65
";

/// Write `contents` to `name` inside `dir` and return the path
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Create a temporary directory holding churn train/validation/score CSVs
pub fn create_churn_files() -> (TempDir, PathBuf, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let train = write_csv(temp_dir.path(), "train.csv", TRAIN_CSV);
    let validation = write_csv(temp_dir.path(), "validation.csv", VALIDATION_CSV);
    let score = write_csv(temp_dir.path(), "score.csv", SCORE_CSV);
    (temp_dir, train, validation, score)
}

/// Pipeline configuration writing into `<dir>/processed`
pub fn churn_pipeline_config(
    dir: &Path,
    train: PathBuf,
    validation: Option<PathBuf>,
    score: Option<PathBuf>,
) -> PipelineConfig {
    PipelineConfig {
        columns: ColumnConfig::churn(),
        train,
        validation,
        score,
        output_dir: dir.join("processed"),
        state_path: None,
        infer_schema_length: 10000,
    }
}

/// Small in-memory churn-like reference table
pub fn create_reference_dataframe() -> DataFrame {
    df! {
        "id" => ["a", "b", "c", "d", "e", "f"],
        "Age" => [Some(30.0f64), Some(40.0), None, Some(50.0), Some(60.0), Some(f64::NAN)],
        "Balance" => [0.0f64, 100.0, 200.0, 300.0, 400.0, 500.0],
        "Geography" => [Some("France"), Some("Spain"), Some("France"), None, Some("Germany"), Some("Spain")],
        "Exited" => [0i32, 1, 0, 1, 0, 1],
    }
    .unwrap()
}

pub fn reference_config() -> ColumnConfig {
    ColumnConfig {
        id_column: "id".to_string(),
        target_column: Some("Exited".to_string()),
        numeric: vec!["Age".to_string(), "Balance".to_string()],
        categorical: vec!["Geography".to_string()],
        drop_first: false,
        relabel: Default::default(),
        target_mapping: None,
    }
}

/// Create a larger random reference table for stress tests
pub fn create_large_test_dataframe(rows: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let regions = ["North", "South", "East", "West"];

    let ids: Vec<String> = (0..rows).map(|i| format!("row{}", i)).collect();
    let age: Vec<Option<f64>> = (0..rows)
        .map(|_| {
            if rng.gen::<f64>() < 0.1 {
                None
            } else {
                Some(rng.gen_range(18.0..90.0))
            }
        })
        .collect();
    let balance: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>() * 250_000.0).collect();
    let geography: Vec<&str> = (0..rows)
        .map(|_| regions[rng.gen_range(0..regions.len())])
        .collect();
    let exited: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();

    df! {
        "id" => ids,
        "Age" => age,
        "Balance" => balance,
        "Geography" => geography,
        "Exited" => exited,
    }
    .unwrap()
}

pub fn f64_column(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

pub fn i32_column(df: &DataFrame, name: &str) -> Vec<i32> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int32)
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

/// Read a CSV written by the pipeline back into a DataFrame
pub fn read_output(path: &Path) -> DataFrame {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .unwrap()
        .finish()
        .unwrap()
}
