//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::pipeline::{ColumnConfig, DatasetKind, PipelineConfig, Preset, TargetMapping};

/// tabprep - Turn raw customer tables into model-ready feature matrices
#[derive(Parser, Debug)]
#[command(name = "tabprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the transformer on training data and export train/validation/scoring matrices
    Fit(FitArgs),

    /// Transform one dataset with a previously saved state
    Apply {
        /// Saved transform state (JSON written by `fit`)
        #[arg(short, long)]
        state: PathBuf,

        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV path. Defaults to input directory with '_transformed' suffix
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Role of the input in messages and reports: training, validation or scoring
        #[arg(long, default_value = "scoring")]
        kind: DatasetKind,

        /// Number of rows to use for schema inference. Use 0 for full table scan.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,

        /// Skip the overwrite confirmation prompt
        #[arg(long, default_value = "false")]
        no_confirm: bool,
    },

    /// Print the statistics stored in a saved state
    Inspect {
        /// Saved transform state (JSON written by `fit`)
        #[arg(short, long)]
        state: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct FitArgs {
    /// Training CSV file; the only dataset statistics are learned from
    #[arg(long)]
    pub train: PathBuf,

    /// Validation CSV file, transformed with the training statistics
    #[arg(long)]
    pub validation: Option<PathBuf>,

    /// Scoring CSV file (no target column), transformed with the training statistics
    #[arg(long)]
    pub score: Option<PathBuf>,

    /// Directory for transform_train.csv, transform_val.csv, transform_score.csv
    #[arg(short, long, default_value = "data/processed")]
    pub output_dir: PathBuf,

    /// Where to save the fitted state. Defaults to <output-dir>/transform_state.json
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Built-in column configuration: "churn" or "housing"
    #[arg(long, default_value = "churn", conflicts_with = "columns")]
    pub preset: Preset,

    /// JSON column configuration file (overrides --preset)
    #[arg(long)]
    pub columns: Option<PathBuf>,

    /// Omit the first category of every categorical column
    #[arg(long, default_value = "false")]
    pub drop_first: bool,

    /// Value in target column that represents EVENT (maps to 1).
    /// Required with --non-event-value when target is not binary 0/1.
    #[arg(long, requires = "non_event_value")]
    pub event_value: Option<String>,

    /// Value in target column that represents NON-EVENT (maps to 0).
    #[arg(long, requires = "event_value")]
    pub non_event_value: Option<String>,

    /// Skip the overwrite confirmation prompt
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference.
    /// Higher values improve type detection for ambiguous columns but may be slower.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl FitArgs {
    /// Column configuration from --columns or --preset, with CLI overrides applied
    pub fn column_config(&self) -> Result<ColumnConfig> {
        let mut config = match &self.columns {
            Some(path) => ColumnConfig::from_json_file(path)?,
            None => ColumnConfig::from_preset(self.preset),
        };

        if self.drop_first {
            config.drop_first = true;
        }

        if let (Some(event), Some(non_event)) = (&self.event_value, &self.non_event_value) {
            config.target_mapping = Some(TargetMapping::new(event.clone(), non_event.clone()));
        }

        Ok(config)
    }

    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        Ok(PipelineConfig {
            columns: self.column_config()?,
            train: self.train.clone(),
            validation: self.validation.clone(),
            score: self.score.clone(),
            output_dir: self.output_dir.clone(),
            state_path: self.state.clone(),
            infer_schema_length: self.infer_schema_length,
        })
    }
}

/// Derive the `apply` output path: same directory, '_transformed' suffix
pub fn transformed_output_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    parent.join(format!("{}_transformed.csv", stem))
}
