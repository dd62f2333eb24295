//! Static value substitutions for categorical columns
//!
//! Some raw tables store categories as codes ("0"/"1", "2" for "good").
//! The relabel table maps those codes to readable labels before the
//! imputer and encoder see them. Values without an entry pass through.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-column lookup of raw value -> label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelabelTable {
    columns: BTreeMap<String, BTreeMap<String, String>>,
}

impl RelabelTable {
    /// Register substitutions for a column, extending any existing entries
    pub fn insert<'a, I>(&mut self, column: &str, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let entry = self.columns.entry(column.to_string()).or_default();
        for (raw, label) in pairs {
            entry.insert(raw.to_string(), label.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether any substitution is registered for the column
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Relabel a whole column of optional values
    pub fn apply(&self, column: &str, values: Vec<Option<String>>) -> Vec<Option<String>> {
        let Some(map) = self.columns.get(column) else {
            return values;
        };

        values
            .into_iter()
            .map(|v| v.map(|raw| map.get(&raw).cloned().unwrap_or(raw)))
            .collect()
    }
}
