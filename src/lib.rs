//! tidytab - Canonicalize, compare, and reshape tabular data
//!
//! A library for normalizing tabular datasets into a permutation-independent
//! canonical form, testing two tables for equivalence up to row/column
//! reordering, and reshaping "long" (key/value) tables into wide form.

pub mod canon;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod reshape;

pub use canon::{canonicalize, equivalent, equivalent_with};
pub use config::{CastOptions, DuplicatePolicy, EquivOptions, JoinMode, NullEquality};
pub use error::{CastError, SchemaError};
pub use model::Table;
pub use reshape::cast;
