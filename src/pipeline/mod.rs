//! Pipeline module - fitting and applying the feature transformation

pub mod boundary;
pub mod columns;
pub mod driver;
pub mod encoder;
pub mod error;
pub mod imputer;
pub mod loader;
pub mod relabel;
pub mod scaler;
pub mod state;
pub mod target;
pub mod transformer;
pub mod values;

pub use boundary::*;
pub use columns::*;
pub use driver::*;
pub use encoder::{CategorySet, EncodedColumn, UnseenCategories};
pub use error::*;
pub use imputer::MISSING_CATEGORY;
pub use loader::*;
pub use relabel::RelabelTable;
pub use scaler::ScaleParams;
pub use state::*;
pub use target::*;
pub use transformer::*;
pub use values::column_names;
