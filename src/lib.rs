//! tabprep: Feature Transformation Library
//!
//! Fits imputation, scaling and one-hot statistics on a training table and
//! applies them unchanged to validation and scoring tables, so every
//! exported matrix shares one column schema.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
