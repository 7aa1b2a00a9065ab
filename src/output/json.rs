//! JSON output format

use std::io::Write;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::model::Table;

use super::OutputFormatter;

/// JSON output formatter: an array of column-keyed records
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut records: Vec<Map<String, Value>> = Vec::with_capacity(table.row_count());
        for row in &table.rows {
            let mut record = Map::with_capacity(table.column_count());
            for (column, cell) in table.columns.iter().zip(&row.cells) {
                record.insert(column.name.clone(), serde_json::to_value(cell)?);
            }
            records.push(record);
        }

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &records)?;
        } else {
            serde_json::to_writer(&mut *writer, &records)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}
