//! Aligned terminal output

use std::io::{IsTerminal, Write};

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::model::Table;

use super::OutputFormatter;

/// Terminal output as an aligned, boxed table
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut builder = Builder::default();
        builder.push_record(table.column_names());
        for row in &table.rows {
            builder.push_record(row.cells.iter().map(|c| c.display().into_owned()));
        }

        let mut display = builder.build();
        display.with(Style::sharp());
        writeln!(writer, "{}", display)?;
        writeln!(writer, "{} rows", table.row_count())?;
        Ok(())
    }
}

/// Write a colored equivalent / not-equivalent verdict to stdout.
///
/// `ColorChoice::Auto` does no tty detection of its own, so pipes get
/// plain text only if we downgrade to `Never` ourselves.
pub fn write_verdict(equivalent: bool) -> Result<()> {
    let choice = if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    let (color, text) = if equivalent {
        (Color::Green, "equivalent")
    } else {
        (Color::Red, "not equivalent")
    };
    stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(stdout, "{}", text)?;
    stdout.reset()?;
    writeln!(stdout)?;
    Ok(())
}
