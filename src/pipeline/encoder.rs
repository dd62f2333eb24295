//! One-hot indicator expansion for categorical columns
//!
//! The category set is learned once from the reference column and sorted,
//! so the indicator layout never depends on the dataset being encoded.
//! Values outside the set produce an all-zero row instead of an error.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Maximum number of distinct unseen values kept as examples
const UNSEEN_EXAMPLE_LIMIT: usize = 5;

/// Learned category layout for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySet {
    /// All distinct reference values, sorted
    categories: Vec<String>,
    /// Whether the first category is left out of the indicators
    drop_first: bool,
}

impl CategorySet {
    /// Every learned category, including a dropped first one
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn drop_first(&self) -> bool {
        self.drop_first
    }

    /// Categories that get an indicator column
    pub fn encoded(&self) -> &[String] {
        if self.drop_first && !self.categories.is_empty() {
            &self.categories[1..]
        } else {
            &self.categories
        }
    }

    /// Number of indicator columns produced
    pub fn width(&self) -> usize {
        self.encoded().len()
    }

    /// Indicator column names, `<column>_<category>`
    pub fn indicator_names(&self, column: &str) -> Vec<String> {
        self.encoded()
            .iter()
            .map(|cat| indicator_name(column, cat))
            .collect()
    }
}

/// Name of the indicator column for a category
pub fn indicator_name(column: &str, category: &str) -> String {
    format!("{}_{}", column, category)
}

/// Values in an applied column that were never seen at fit time
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnseenCategories {
    /// Rows carrying an unseen value
    pub rows: usize,
    /// A few distinct unseen values, sorted
    pub examples: Vec<String>,
}

/// Indicator columns for one categorical column
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedColumn {
    /// One 0/1 vector per encoded category, in `CategorySet::encoded` order
    pub indicators: Vec<Vec<i32>>,
    pub unseen: UnseenCategories,
}

/// Learn the sorted distinct values of an imputed reference column
pub fn fit(reference: &[String], drop_first: bool) -> CategorySet {
    let categories: BTreeSet<&str> = reference.iter().map(String::as_str).collect();
    CategorySet {
        categories: categories.into_iter().map(str::to_string).collect(),
        drop_first,
    }
}

/// Expand values into indicator columns using a fitted category set
pub fn apply(values: &[String], set: &CategorySet) -> EncodedColumn {
    let all = set.categories();
    let encoded = set.encoded();
    let offset = all.len() - encoded.len();

    let position: HashMap<&str, usize> = all
        .iter()
        .enumerate()
        .map(|(i, cat)| (cat.as_str(), i))
        .collect();

    let mut indicators = vec![vec![0i32; values.len()]; encoded.len()];
    let mut unseen_rows = 0usize;
    let mut unseen_values: BTreeSet<&str> = BTreeSet::new();

    for (row, value) in values.iter().enumerate() {
        match position.get(value.as_str()) {
            Some(&i) if i >= offset => indicators[i - offset][row] = 1,
            // Dropped first category: all zeros by construction
            Some(_) => {}
            None => {
                unseen_rows += 1;
                unseen_values.insert(value.as_str());
            }
        }
    }

    EncodedColumn {
        indicators,
        unseen: UnseenCategories {
            rows: unseen_rows,
            examples: unseen_values
                .into_iter()
                .take(UNSEEN_EXAMPLE_LIMIT)
                .map(str::to_string)
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fit_sorted_distinct() {
        let set = fit(&strings(&["Spain", "France", "Spain", "Germany"]), false);
        assert_eq!(set.categories(), &strings(&["France", "Germany", "Spain"]));
        assert_eq!(set.width(), 3);
        assert_eq!(
            set.indicator_names("Geography"),
            strings(&["Geography_France", "Geography_Germany", "Geography_Spain"])
        );
    }

    #[test]
    fn test_apply_one_hot() {
        let set = fit(&strings(&["France", "Spain"]), false);
        let out = apply(&strings(&["Spain", "France", "Spain"]), &set);
        assert_eq!(out.indicators, vec![vec![0, 1, 0], vec![1, 0, 1]]);
        assert_eq!(out.unseen.rows, 0);
    }

    #[test]
    fn test_unseen_category_is_all_zero() {
        let set = fit(&strings(&["France", "Spain"]), false);
        let out = apply(&strings(&["Germany", "Spain", "Italy", "Germany"]), &set);
        assert_eq!(out.indicators.len(), 2);
        assert_eq!(out.indicators[0], vec![0, 0, 0, 0]);
        assert_eq!(out.indicators[1], vec![0, 1, 0, 0]);
        assert_eq!(out.unseen.rows, 3);
        assert_eq!(out.unseen.examples, strings(&["Germany", "Italy"]));
    }

    #[test]
    fn test_width_is_independent_of_applied_values() {
        let set = fit(&strings(&["a", "b", "c"]), false);
        for values in [strings(&[]), strings(&["a"]), strings(&["x", "y"])] {
            assert_eq!(apply(&values, &set).indicators.len(), 3);
        }
    }

    #[test]
    fn test_drop_first() {
        let set = fit(&strings(&["Male", "Female"]), true);
        assert_eq!(set.categories(), &strings(&["Female", "Male"]));
        assert_eq!(set.indicator_names("Gender"), strings(&["Gender_Male"]));

        let out = apply(&strings(&["Female", "Male", "Other"]), &set);
        assert_eq!(out.indicators, vec![vec![0, 1, 0]]);
        // The dropped category is known, only "Other" is unseen
        assert_eq!(out.unseen.rows, 1);
    }

    #[test]
    fn test_unseen_examples_are_capped() {
        let set = fit(&strings(&["a"]), false);
        let values = strings(&["b", "c", "d", "e", "f", "g", "h"]);
        let out = apply(&values, &set);
        assert_eq!(out.unseen.rows, 7);
        assert_eq!(out.unseen.examples.len(), UNSEEN_EXAMPLE_LIMIT);
    }
}
