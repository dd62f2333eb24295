//! Z-score scaling for numeric columns

use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of an imputed reference column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleParams {
    pub mean: f64,
    pub std_dev: f64,
}

/// Learn mean and population standard deviation.
///
/// A column whose values are all identical gets `std_dev == 0.0` exactly,
/// so floating point noise in the mean cannot produce a tiny divisor.
pub fn fit(reference: &[f64]) -> ScaleParams {
    if reference.is_empty() {
        return ScaleParams {
            mean: 0.0,
            std_dev: 0.0,
        };
    }

    let n = reference.len() as f64;
    let mean = reference.iter().sum::<f64>() / n;

    let first = reference[0];
    if reference.iter().all(|&v| v == first) {
        return ScaleParams {
            mean: first,
            std_dev: 0.0,
        };
    }

    let variance = reference.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    ScaleParams {
        mean,
        std_dev: variance.sqrt(),
    }
}

/// Apply `(value - mean) / std_dev`; a constant column maps to all zeros
pub fn apply(values: &[f64], params: ScaleParams) -> Vec<f64> {
    if params.std_dev == 0.0 {
        return vec![0.0; values.len()];
    }

    values
        .iter()
        .map(|v| (v - params.mean) / params.std_dev)
        .collect()
}
