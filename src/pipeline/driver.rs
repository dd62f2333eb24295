//! Pipeline driver: fit once on training data, apply everywhere
//!
//! The training dataset defines the `TransformState`. Validation and
//! scoring datasets are transformed with that same state; they are never
//! refit. Training failures abort the run, later datasets fail on their own.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::columns::ColumnConfig;
use super::encoder::UnseenCategories;
use super::loader::{estimated_memory_mb, load_dataset, save_dataset};
use super::state::{load_state, save_state, TransformState};
use super::transformer::{apply_transformer, check_required_columns, fit_transformer};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_count, print_info,
    print_step_header, print_success, print_warning,
};

/// File name of the persisted state inside the output directory
pub const STATE_FILE_NAME: &str = "transform_state.json";

/// Role of a dataset within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Training,
    Validation,
    Scoring,
}

impl DatasetKind {
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::Training => "training",
            DatasetKind::Validation => "validation",
            DatasetKind::Scoring => "scoring",
        }
    }

    /// Default export name under the output directory
    pub fn output_file_name(&self) -> &'static str {
        match self {
            DatasetKind::Training => "transform_train.csv",
            DatasetKind::Validation => "transform_val.csv",
            DatasetKind::Scoring => "transform_score.csv",
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "training" | "train" => Ok(DatasetKind::Training),
            "validation" | "val" => Ok(DatasetKind::Validation),
            "scoring" | "score" => Ok(DatasetKind::Scoring),
            _ => Err(format!(
                "Unknown dataset kind: '{}'. Use 'training', 'validation' or 'scoring'.",
                s
            )),
        }
    }
}

/// Inputs and outputs of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub columns: ColumnConfig,
    pub train: PathBuf,
    pub validation: Option<PathBuf>,
    pub score: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Where to persist the state; defaults to `<output_dir>/transform_state.json`
    pub state_path: Option<PathBuf>,
    pub infer_schema_length: usize,
}

impl PipelineConfig {
    pub fn state_path(&self) -> PathBuf {
        self.state_path
            .clone()
            .unwrap_or_else(|| self.output_dir.join(STATE_FILE_NAME))
    }

    pub fn output_path(&self, kind: DatasetKind) -> PathBuf {
        self.output_dir.join(kind.output_file_name())
    }

    /// Every file the run may write
    pub fn planned_outputs(&self) -> Vec<PathBuf> {
        let mut outputs = vec![self.output_path(DatasetKind::Training)];
        if self.validation.is_some() {
            outputs.push(self.output_path(DatasetKind::Validation));
        }
        if self.score.is_some() {
            outputs.push(self.output_path(DatasetKind::Scoring));
        }
        outputs.push(self.state_path());
        outputs
    }
}

/// What an exported matrix looks like
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub rows: usize,
    /// Total columns written, identifier and target included
    pub columns: usize,
    pub has_target: bool,
    pub unseen: Vec<(String, UnseenCategories)>,
}

/// Outcome for one dataset in a run
#[derive(Debug, Clone)]
pub struct DatasetReport {
    pub kind: DatasetKind,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Export summary, or the error message that stopped this dataset
    pub result: std::result::Result<ExportSummary, String>,
}

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub state: TransformState,
    pub state_path: PathBuf,
    pub datasets: Vec<DatasetReport>,
}

impl PipelineRun {
    pub fn failures(&self) -> usize {
        self.datasets.iter().filter(|d| d.result.is_err()).count()
    }
}

/// Columns read as text: the identifier and every categorical column
fn string_columns<'a>(id_column: &'a str, categorical: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    std::iter::once(id_column).chain(categorical).collect()
}

/// Load, transform and export one dataset with an existing state
pub fn transform_file(
    input: &Path,
    output: &Path,
    state: &TransformState,
    kind: DatasetKind,
    infer_schema_length: usize,
) -> Result<ExportSummary> {
    let spinner = create_spinner(&format!("Loading {} dataset...", kind));
    let string_cols = string_columns(
        state.id_column(),
        state.categorical().iter().map(|c| c.name.as_str()),
    );
    let df = match load_dataset(input, &string_cols, infer_schema_length) {
        Ok(df) => df,
        Err(e) => {
            finish_with_warning(&spinner, &format!("Failed to load {} dataset", kind));
            return Err(e);
        }
    };
    finish_with_success(
        &spinner,
        &format!(
            "Loaded {} ({} rows, {:.2} MB)",
            input.display(),
            df.height(),
            estimated_memory_mb(&df)
        ),
    );

    let mut transformed = apply_transformer(&df, state, kind.label())?;
    report_unseen(&transformed.unseen);

    let spinner = create_spinner("Writing matrix...");
    save_dataset(&mut transformed.matrix, output)?;
    finish_with_success(&spinner, &format!("Saved to {}", output.display()));

    let (rows, columns) = transformed.matrix.shape();
    Ok(ExportSummary {
        rows,
        columns,
        has_target: transformed.has_target,
        unseen: transformed.unseen,
    })
}

fn report_unseen(unseen: &[(String, UnseenCategories)]) {
    if unseen.is_empty() {
        return;
    }
    print_info("Unseen categories encoded as all-zero indicators:");
    for (column, info) in unseen {
        print_count(
            &format!("row(s) in '{}'", column),
            info.rows,
            Some(&format!("e.g. {}", info.examples.join(", "))),
        );
    }
}

/// Run the full pipeline: fit on training, apply to every dataset, export.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineRun> {
    config.columns.validate()?;

    // Step 1: fit on the training dataset
    print_step_header(1, "Fit on training data");
    let spinner = create_spinner("Loading training dataset...");
    let string_cols = string_columns(
        &config.columns.id_column,
        config.columns.categorical.iter().map(String::as_str),
    );
    let train_df = load_dataset(&config.train, &string_cols, config.infer_schema_length)?;
    finish_with_success(
        &spinner,
        &format!(
            "Loaded {} ({} rows, {:.2} MB)",
            config.train.display(),
            train_df.height(),
            estimated_memory_mb(&train_df)
        ),
    );

    // Catch schema problems before any statistics are computed
    check_required_columns(&train_df, &config.columns.required_columns(), "training")?;

    let state = fit_transformer(&train_df, &config.columns)?;
    print_success(&format!(
        "Fitted {} numeric and {} categorical column(s) into {} feature(s)",
        state.numeric().len(),
        state.categorical().len(),
        state.feature_count()
    ));

    // Step 2: training matrix (failure here aborts the run)
    print_step_header(2, "Transform training data");
    let train_output = config.output_path(DatasetKind::Training);
    let mut transformed = apply_transformer(&train_df, &state, DatasetKind::Training.label())?;
    drop(train_df);
    report_unseen(&transformed.unseen);
    save_dataset(&mut transformed.matrix, &train_output)?;
    print_success(&format!("Saved to {}", train_output.display()));

    // Only a state that produced the training matrix is persisted
    let state_path = config.state_path();
    save_state(&state, &state_path)?;
    print_success(&format!("State saved to {}", state_path.display()));

    let (rows, columns) = transformed.matrix.shape();
    let mut datasets = vec![DatasetReport {
        kind: DatasetKind::Training,
        input: config.train.clone(),
        output: train_output,
        result: Ok(ExportSummary {
            rows,
            columns,
            has_target: transformed.has_target,
            unseen: transformed.unseen,
        }),
    }];

    // Step 3+: validation and scoring, each on its own
    let followups = [
        (DatasetKind::Validation, config.validation.as_ref()),
        (DatasetKind::Scoring, config.score.as_ref()),
    ];
    let mut step = 3u8;
    for (kind, input) in followups {
        let Some(input) = input else {
            continue;
        };

        print_step_header(step, &format!("Transform {} data", kind));
        step += 1;

        let output = config.output_path(kind);
        let result = transform_file(input, &output, &state, kind, config.infer_schema_length)
            .map_err(|e| {
                let message = format!("{:#}", e);
                print_warning(&format!("{} dataset failed: {}", kind, message));
                message
            });

        datasets.push(DatasetReport {
            kind,
            input: input.clone(),
            output,
            result,
        });
    }

    Ok(PipelineRun {
        state,
        state_path,
        datasets,
    })
}

/// Transform a dataset in a separate process using a persisted state
pub fn apply_saved_state(
    state_path: &Path,
    input: &Path,
    output: &Path,
    kind: DatasetKind,
    infer_schema_length: usize,
) -> Result<(TransformState, ExportSummary)> {
    let state = load_state(state_path)?;
    print_info(&format!(
        "Loaded state fitted on {} rows at {}",
        state.fitted_rows(),
        state.fitted_at()
    ));
    let summary = transform_file(input, output, &state, kind, infer_schema_length)?;
    Ok((state, summary))
}
