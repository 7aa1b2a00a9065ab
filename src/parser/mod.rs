//! Loader layer for reading tabular data from delimited text files

mod csv;

use std::path::Path;

use anyhow::{bail, Result};

use crate::model::Table;

pub use self::csv::CsvParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Load a table from a file, picking a parser by extension
pub fn load_table(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let parser = CsvParser;
    if !parser.supports_extension(&ext) {
        bail!(
            "Unsupported file format: {}",
            if ext.is_empty() { "unknown" } else { ext.as_str() }
        );
    }
    parser.parse(path)
}
