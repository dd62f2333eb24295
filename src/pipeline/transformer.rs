//! Column transformer: imputer + scaler for numeric columns, imputer +
//! encoder for categorical columns, fitted once and applied many times.
//!
//! The shape of an applied matrix comes from the `TransformState` alone.
//! The dataset only decides whether the target column is re-attached.

use std::collections::HashSet;

use anyhow::Result;
use polars::prelude::*;
use rayon::prelude::*;

use super::columns::ColumnConfig;
use super::encoder::{self, UnseenCategories};
use super::error::TransformError;
use super::imputer;
use super::relabel::RelabelTable;
use super::scaler;
use super::state::{CategoricalState, NumericState, StateParts, TransformState};
use super::target::binary_target_column;
use super::values::{column_names, column_to_f64_vec, column_to_string_vec};

/// A transformed dataset plus what was noticed while transforming it
#[derive(Debug, Clone)]
pub struct TransformedDataset {
    /// Identifier, optional target, then feature columns
    pub matrix: DataFrame,
    /// Whether the target column was present and re-attached
    pub has_target: bool,
    /// Per categorical column, values not seen at fit time (only non-empty entries)
    pub unseen: Vec<(String, UnseenCategories)>,
}

impl TransformedDataset {
    /// Total rows that carried at least one unseen category value, summed per column
    pub fn unseen_rows(&self) -> usize {
        self.unseen.iter().map(|(_, u)| u.rows).sum()
    }
}

/// Fail with `UnknownColumn` if any required column is absent
pub fn check_required_columns(df: &DataFrame, required: &[&str], dataset: &str) -> Result<()> {
    let available = column_names(df);

    for name in required {
        if !available.iter().any(|a| a == name) {
            return Err(TransformError::UnknownColumn {
                column: name.to_string(),
                dataset: dataset.to_string(),
                available,
            }
            .into());
        }
    }
    Ok(())
}

/// Fail with `DuplicateIdentifier` if the identifier column repeats a value
pub fn check_unique_ids(df: &DataFrame, id_column: &str) -> Result<()> {
    let ids = column_to_string_vec(df.column(id_column)?)?;
    let mut seen: HashSet<Option<&str>> = HashSet::with_capacity(ids.len());
    let duplicates = ids
        .iter()
        .filter(|id| !seen.insert(id.as_deref()))
        .count();

    if duplicates > 0 {
        return Err(TransformError::DuplicateIdentifier {
            column: id_column.to_string(),
            count: duplicates,
        }
        .into());
    }
    Ok(())
}

/// Categorical values after relabeling and imputation
fn prepared_categories(
    df: &DataFrame,
    name: &str,
    fill: &str,
    relabel: &RelabelTable,
) -> Result<Vec<String>> {
    let raw = column_to_string_vec(df.column(name)?)?;
    let relabeled = relabel.apply(name, raw);
    Ok(imputer::apply_categorical(relabeled, fill))
}

/// Learn every column's statistics from the reference (training) dataset.
///
/// Any failure aborts the fit; no partial state is returned.
pub fn fit_transformer(df: &DataFrame, config: &ColumnConfig) -> Result<TransformState> {
    config.validate()?;
    check_required_columns(df, &config.required_columns(), "reference")?;
    check_unique_ids(df, &config.id_column)?;

    // The labels must be usable before any statistics are kept
    if let Some(target) = &config.target_column {
        if df.get_column_index(target).is_some() {
            binary_target_column(df, target, config.target_mapping.as_ref())?;
        }
    }

    let numeric: Vec<NumericState> = config
        .numeric
        .par_iter()
        .map(|name| -> Result<NumericState> {
            let values = column_to_f64_vec(df.column(name)?)?;
            let fill_value = imputer::fit_numeric(name, &values)?;
            let imputed = imputer::apply_numeric(&values, fill_value);
            Ok(NumericState {
                name: name.clone(),
                fill_value,
                scale: scaler::fit(&imputed),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let categorical: Vec<CategoricalState> = config
        .categorical
        .par_iter()
        .map(|name| -> Result<CategoricalState> {
            let fill_value = imputer::fit_categorical();
            let values = prepared_categories(df, name, &fill_value, &config.relabel)?;
            Ok(CategoricalState {
                name: name.clone(),
                categories: encoder::fit(&values, config.drop_first),
                fill_value,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let state = TransformState::from_parts(StateParts {
        fitted_rows: df.height(),
        id_column: config.id_column.clone(),
        target_column: config.target_column.clone(),
        target_mapping: config.target_mapping.clone(),
        relabel: config.relabel.clone(),
        numeric,
        categorical,
    })?;

    Ok(state)
}

/// Transform a dataset with a fitted state.
///
/// Output columns: identifier, target (only when the dataset has it),
/// scaled numeric columns, then indicator columns, all in fitted order.
pub fn apply_transformer(
    df: &DataFrame,
    state: &TransformState,
    dataset: &str,
) -> Result<TransformedDataset> {
    check_required_columns(df, &state.required_columns(), dataset)?;
    check_unique_ids(df, state.id_column())?;

    let mut columns: Vec<Column> = Vec::with_capacity(2 + state.feature_count());
    columns.push(df.column(state.id_column())?.clone());

    let has_target = match state.target_column() {
        Some(target) if df.get_column_index(target).is_some() => {
            columns.push(binary_target_column(df, target, state.target_mapping())?);
            true
        }
        _ => false,
    };

    let numeric: Vec<Column> = state
        .numeric()
        .par_iter()
        .map(|col_state| -> Result<Column> {
            let values = column_to_f64_vec(df.column(&col_state.name)?)?;
            let imputed = imputer::apply_numeric(&values, col_state.fill_value);
            let scaled = scaler::apply(&imputed, col_state.scale);
            Ok(Column::new(col_state.name.as_str().into(), scaled))
        })
        .collect::<Result<Vec<_>>>()?;
    columns.extend(numeric);

    let encoded: Vec<(Vec<Column>, UnseenCategories)> = state
        .categorical()
        .par_iter()
        .map(|col_state| -> Result<(Vec<Column>, UnseenCategories)> {
            let values =
                prepared_categories(df, &col_state.name, &col_state.fill_value, state.relabel())?;
            let encoded = encoder::apply(&values, &col_state.categories);
            let names = col_state.categories.indicator_names(&col_state.name);
            let indicator_cols = names
                .into_iter()
                .zip(encoded.indicators)
                .map(|(name, indicator)| Column::new(name.into(), indicator))
                .collect();
            Ok((indicator_cols, encoded.unseen))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut unseen = Vec::new();
    for (col_state, (indicator_cols, col_unseen)) in state.categorical().iter().zip(encoded) {
        columns.extend(indicator_cols);
        if col_unseen.rows > 0 {
            unseen.push((col_state.name.clone(), col_unseen));
        }
    }

    let matrix = DataFrame::new(columns)?;

    Ok(TransformedDataset {
        matrix,
        has_target,
        unseen,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ColumnConfig {
        ColumnConfig {
            id_column: "id".to_string(),
            target_column: Some("Exited".to_string()),
            numeric: vec!["Balance".to_string()],
            categorical: vec!["Geography".to_string()],
            drop_first: false,
            relabel: RelabelTable::default(),
            target_mapping: None,
        }
    }

    fn training() -> DataFrame {
        df! {
            "id" => [1i64, 2],
            "Geography" => ["France", "Spain"],
            "Balance" => [100.0f64, 300.0],
            "Exited" => [0i32, 1],
        }
        .unwrap()
    }

    fn f64_values(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap())
            .collect()
    }

    fn i32_values(df: &DataFrame, name: &str) -> Vec<i32> {
        df.column(name)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap())
            .collect()
    }

    #[test]
    fn test_fit_learns_statistics() {
        let state = fit_transformer(&training(), &config()).unwrap();

        let balance = &state.numeric()[0];
        assert!((balance.fill_value - 200.0).abs() < 1e-12);
        assert!((balance.scale.mean - 200.0).abs() < 1e-12);
        assert!((balance.scale.std_dev - 100.0).abs() < 1e-12);

        let geography = &state.categorical()[0];
        assert_eq!(
            geography.categories.categories(),
            &["France".to_string(), "Spain".to_string()]
        );
        assert_eq!(state.fitted_rows(), 2);
    }

    #[test]
    fn test_scoring_row_with_unseen_category() {
        let state = fit_transformer(&training(), &config()).unwrap();
        let scoring = df! {
            "id" => [3i64],
            "Geography" => ["Germany"],
            "Balance" => [500.0f64],
        }
        .unwrap();

        let out = apply_transformer(&scoring, &state, "scoring").unwrap();
        assert!(!out.has_target);
        assert_eq!(
            column_names(&out.matrix),
            vec!["id", "Balance", "Geography_France", "Geography_Spain"]
        );
        assert_eq!(f64_values(&out.matrix, "Balance"), vec![3.0]);
        assert_eq!(i32_values(&out.matrix, "Geography_France"), vec![0]);
        assert_eq!(i32_values(&out.matrix, "Geography_Spain"), vec![0]);
        assert_eq!(out.unseen.len(), 1);
        assert_eq!(out.unseen[0].1.examples, vec!["Germany".to_string()]);
        assert_eq!(out.unseen_rows(), 1);
    }

    #[test]
    fn test_target_reattached_first() {
        let state = fit_transformer(&training(), &config()).unwrap();
        let out = apply_transformer(&training(), &state, "training").unwrap();
        assert!(out.has_target);
        assert_eq!(
            column_names(&out.matrix),
            vec!["id", "Exited", "Balance", "Geography_France", "Geography_Spain"]
        );
        assert_eq!(i32_values(&out.matrix, "Exited"), vec![0, 1]);
        assert_eq!(f64_values(&out.matrix, "Balance"), vec![-1.0, 1.0]);
    }

    #[test]
    fn test_missing_values_imputed_before_scaling() {
        let df = df! {
            "id" => [1i64, 2, 3],
            "Geography" => [Some("France"), None, Some("Spain")],
            "Balance" => [Some(100.0f64), None, Some(300.0)],
        }
        .unwrap();
        let state = fit_transformer(&df, &config()).unwrap();

        let geography = &state.categorical()[0];
        assert_eq!(
            geography.categories.categories(),
            &["France".to_string(), "Spain".to_string(), "missing".to_string()]
        );

        let out = apply_transformer(&df, &state, "training").unwrap();
        let balance = f64_values(&out.matrix, "Balance");
        assert!(balance[1].abs() < 1e-12, "Imputed mean should scale to 0");
        assert_eq!(i32_values(&out.matrix, "Geography_missing"), vec![0, 1, 0]);
    }

    #[test]
    fn test_unknown_column_fails_before_transform() {
        let state = fit_transformer(&training(), &config()).unwrap();
        let df = df! {
            "id" => [3i64],
            "Balance" => [500.0f64],
        }
        .unwrap();

        let err = apply_transformer(&df, &state, "validation").unwrap_err();
        match err.downcast_ref::<TransformError>() {
            Some(TransformError::UnknownColumn { column, dataset, .. }) => {
                assert_eq!(column, "Geography");
                assert_eq!(dataset, "validation");
            }
            other => panic!("Expected UnknownColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_numeric_reference_aborts_fit() {
        let df = df! {
            "id" => [1i64, 2],
            "Geography" => ["France", "Spain"],
            "Balance" => [None::<f64>, None],
        }
        .unwrap();

        let err = fit_transformer(&df, &config()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TransformError>(),
            Some(&TransformError::EmptyColumn {
                column: "Balance".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let df = df! {
            "id" => [1i64, 1],
            "Geography" => ["France", "Spain"],
            "Balance" => [1.0f64, 2.0],
        }
        .unwrap();

        let err = fit_transformer(&df, &config()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TransformError>(),
            Some(TransformError::DuplicateIdentifier { count: 1, .. })
        ));
    }

    #[test]
    fn test_relabel_applied_before_encoding() {
        let mut config = config();
        config.categorical.push("HasCrCard".to_string());
        config.relabel.insert("HasCrCard", [("0", "No"), ("1", "Yes")]);

        let df = df! {
            "id" => [1i64, 2],
            "Geography" => ["France", "Spain"],
            "Balance" => [1.0f64, 2.0],
            "HasCrCard" => [1i64, 0],
        }
        .unwrap();

        let state = fit_transformer(&df, &config).unwrap();
        let out = apply_transformer(&df, &state, "training").unwrap();
        assert_eq!(i32_values(&out.matrix, "HasCrCard_Yes"), vec![1, 0]);
        assert_eq!(i32_values(&out.matrix, "HasCrCard_No"), vec![0, 1]);
    }
}
