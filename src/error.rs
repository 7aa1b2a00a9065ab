//! Error types for table construction and the core operations

use thiserror::Error;

/// Violations of the table schema invariants
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Two columns share the same name
    #[error("duplicate column name: {name:?}")]
    DuplicateColumn { name: String },

    /// A row's cell count does not match the schema
    #[error("row {row} has {actual} cells but the schema has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A referenced column is not part of the schema
    #[error("no such column: {name:?}")]
    UnknownColumn { name: String },

    /// The key and value columns of a cast must differ
    #[error("key and value must be different columns, both were {name:?}")]
    KeyValueSame { name: String },
}

/// Errors raised by the long-to-wide cast
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CastError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// More than one row maps to the same output cell
    #[error("ambiguous cast: key {key:?} appears more than once for fixed columns ({group})")]
    DuplicateKey { key: String, group: String },
}
