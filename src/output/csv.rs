//! CSV output format

use std::io::Write;

use anyhow::Result;

use crate::model::Table;

use super::OutputFormatter;

/// CSV output formatter. Null cells are written as `NULL`, which the CSV
/// loader reads back as null.
pub struct CsvOutput;

impl OutputFormatter for CsvOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(table.column_names())?;
        for row in &table.rows {
            csv_writer.write_record(row.cells.iter().map(|c| c.display().into_owned()))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
