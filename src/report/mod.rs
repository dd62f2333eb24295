//! Report module - summarizing runs and fitted state

pub mod state_table;
pub mod summary;

pub use state_table::*;
pub use summary::*;
