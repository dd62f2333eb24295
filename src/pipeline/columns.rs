//! Column configuration: which columns are numeric, which are categorical,
//! and where the identifier and target live.
//!
//! The tagging is fixed configuration and is never inferred from data.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::TransformError;
use super::relabel::RelabelTable;
use super::target::TargetMapping;

/// Built-in column configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Preset {
    /// Bank customer churn (`Exited` target)
    Churn,
    /// Housing listings (`HighValue` target)
    Housing,
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::Churn => write!(f, "churn"),
            Preset::Housing => write!(f, "housing"),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "churn" => Ok(Preset::Churn),
            "housing" => Ok(Preset::Housing),
            _ => Err(format!("Unknown preset: '{}'. Use 'churn' or 'housing'.", s)),
        }
    }
}

/// Column roles for one dataset family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Unique row identifier, carried through untouched
    pub id_column: String,
    /// Binary outcome column, present in training/validation data only
    #[serde(default)]
    pub target_column: Option<String>,
    /// Numeric feature columns, in output order
    #[serde(default)]
    pub numeric: Vec<String>,
    /// Categorical feature columns, in output order
    #[serde(default)]
    pub categorical: Vec<String>,
    /// Omit the first category of every categorical column
    #[serde(default)]
    pub drop_first: bool,
    /// Static value substitutions applied to categorical columns before encoding
    #[serde(default)]
    pub relabel: RelabelTable,
    /// Event/non-event values for a target that is not already 0/1
    #[serde(default)]
    pub target_mapping: Option<TargetMapping>,
}

impl ColumnConfig {
    /// Configuration for the bank churn tables (`defaultcc*.csv`)
    pub fn churn() -> Self {
        let mut relabel = RelabelTable::default();
        relabel.insert("HasCrCard", [("0", "No"), ("1", "Yes")]);
        relabel.insert("IsActiveMember", [("0", "No"), ("1", "Yes")]);

        Self {
            id_column: "ID".to_string(),
            target_column: Some("Exited".to_string()),
            numeric: to_strings(&[
                "CreditScore",
                "Age",
                "Tenure",
                "Balance",
                "NumOfProducts",
                "EstimatedSalary",
            ]),
            categorical: to_strings(&["Geography", "Gender", "HasCrCard", "IsActiveMember"]),
            drop_first: false,
            relabel,
            target_mapping: None,
        }
    }

    /// Configuration for the housing listings table
    pub fn housing() -> Self {
        let mut relabel = RelabelTable::default();
        relabel.insert(
            "condition",
            [("0", "poor"), ("1", "fair"), ("2", "good"), ("3", "excellent")],
        );

        Self {
            id_column: "Id".to_string(),
            target_column: Some("HighValue".to_string()),
            numeric: to_strings(&["sqft", "bedrooms", "bathrooms", "year_built"]),
            categorical: to_strings(&["neighborhood", "condition"]),
            drop_first: false,
            relabel,
            target_mapping: None,
        }
    }

    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Churn => Self::churn(),
            Preset::Housing => Self::housing(),
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read column config: {}", path.display()))?;
        let config: ColumnConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse column config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every column has exactly one role
    pub fn validate(&self) -> Result<(), TransformError> {
        if self.numeric.is_empty() && self.categorical.is_empty() {
            return Err(TransformError::InvalidColumnConfig(
                "no numeric or categorical columns configured".to_string(),
            ));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for name in self.numeric.iter().chain(self.categorical.iter()) {
            if !seen.insert(name.as_str()) {
                return Err(TransformError::InvalidColumnConfig(format!(
                    "column '{}' is listed more than once",
                    name
                )));
            }
        }

        if seen.contains(self.id_column.as_str()) {
            return Err(TransformError::InvalidColumnConfig(format!(
                "identifier column '{}' cannot also be a feature",
                self.id_column
            )));
        }

        if let Some(target) = &self.target_column {
            if seen.contains(target.as_str()) || target == &self.id_column {
                return Err(TransformError::InvalidColumnConfig(format!(
                    "target column '{}' cannot also be a feature or the identifier",
                    target
                )));
            }
        }

        Ok(())
    }

    /// Every column a dataset must carry, identifier first
    pub fn required_columns(&self) -> Vec<&str> {
        std::iter::once(self.id_column.as_str())
            .chain(self.numeric.iter().map(String::as_str))
            .chain(self.categorical.iter().map(String::as_str))
            .collect()
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
