//! Fitted transform state and its JSON persistence
//!
//! A `TransformState` is produced once by `fit_transformer` and only ever
//! read afterwards. Fields are private: the only way to get one is to fit
//! it or to load a previously saved one.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::encoder::CategorySet;
use super::error::TransformError;
use super::relabel::RelabelTable;
use super::scaler::ScaleParams;
use super::target::TargetMapping;

/// Learned statistics for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericState {
    pub name: String,
    /// Mean of the non-missing reference values
    pub fill_value: f64,
    /// Scaling learned on the imputed reference column
    pub scale: ScaleParams,
}

/// Learned statistics for one categorical column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalState {
    pub name: String,
    pub fill_value: String,
    pub categories: CategorySet,
}

/// Everything needed to transform a dataset into the fitted matrix schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    tabprep_version: String,
    fitted_at: String,
    fitted_rows: usize,
    id_column: String,
    target_column: Option<String>,
    target_mapping: Option<TargetMapping>,
    relabel: RelabelTable,
    numeric: Vec<NumericState>,
    categorical: Vec<CategoricalState>,
}

/// Parameters a freshly fitted state is assembled from
pub(crate) struct StateParts {
    pub fitted_rows: usize,
    pub id_column: String,
    pub target_column: Option<String>,
    pub target_mapping: Option<TargetMapping>,
    pub relabel: RelabelTable,
    pub numeric: Vec<NumericState>,
    pub categorical: Vec<CategoricalState>,
}

impl TransformState {
    /// Assemble a state, rejecting layouts with clashing output names
    pub(crate) fn from_parts(parts: StateParts) -> Result<Self, TransformError> {
        let state = Self {
            tabprep_version: env!("CARGO_PKG_VERSION").to_string(),
            fitted_at: chrono::Utc::now().to_rfc3339(),
            fitted_rows: parts.fitted_rows,
            id_column: parts.id_column,
            target_column: parts.target_column,
            target_mapping: parts.target_mapping,
            relabel: parts.relabel,
            numeric: parts.numeric,
            categorical: parts.categorical,
        };
        state.check_output_names()?;
        Ok(state)
    }

    fn check_output_names(&self) -> Result<(), TransformError> {
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(self.id_column.clone());
        if let Some(target) = &self.target_column {
            seen.insert(target.clone());
        }

        for name in self.output_columns() {
            if !seen.insert(name.clone()) {
                return Err(TransformError::DuplicateOutputColumn { name });
            }
        }
        Ok(())
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn target_column(&self) -> Option<&str> {
        self.target_column.as_deref()
    }

    pub fn target_mapping(&self) -> Option<&TargetMapping> {
        self.target_mapping.as_ref()
    }

    pub fn relabel(&self) -> &RelabelTable {
        &self.relabel
    }

    pub fn numeric(&self) -> &[NumericState] {
        &self.numeric
    }

    pub fn categorical(&self) -> &[CategoricalState] {
        &self.categorical
    }

    pub fn fitted_rows(&self) -> usize {
        self.fitted_rows
    }

    pub fn fitted_at(&self) -> &str {
        &self.fitted_at
    }

    pub fn version(&self) -> &str {
        &self.tabprep_version
    }

    /// Raw columns every transformed dataset must carry, identifier first
    pub fn required_columns(&self) -> Vec<&str> {
        std::iter::once(self.id_column.as_str())
            .chain(self.numeric.iter().map(|c| c.name.as_str()))
            .chain(self.categorical.iter().map(|c| c.name.as_str()))
            .collect()
    }

    /// Feature column names of the output matrix, in order
    pub fn output_columns(&self) -> Vec<String> {
        let numeric = self.numeric.iter().map(|c| c.name.clone());
        let indicators = self
            .categorical
            .iter()
            .flat_map(|c| c.categories.indicator_names(&c.name));
        numeric.chain(indicators).collect()
    }

    /// Number of feature columns in the output matrix
    pub fn feature_count(&self) -> usize {
        self.numeric.len() + self.categorical.iter().map(|c| c.categories.width()).sum::<usize>()
    }
}

/// Write the state as pretty-printed JSON
pub fn save_state(state: &TransformState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(state).context("Failed to serialize transform state")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write transform state: {}", path.display()))?;
    Ok(())
}

/// Read a state written by `save_state`
pub fn load_state(path: &Path) -> Result<TransformState> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transform state: {}", path.display()))?;
    let state: TransformState = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse transform state: {}", path.display()))?;
    state.check_output_names()?;
    Ok(state)
}
