//! tidytab - Canonicalize, compare, and reshape tabular data

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use tidytab::canon::{canonicalize, equivalent_with};
use tidytab::config::{
    CastOptions, DuplicatePolicy, EquivOptions, JoinMode, NullEquality, OutputFormat,
};
use tidytab::output::{render_to_stdout, write_verdict};
use tidytab::parser::load_table;
use tidytab::reshape::cast;

/// Canonicalize, compare, and reshape tabular data
#[derive(Parser, Debug)]
#[command(name = "tidytab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reshape a long (key/value) table into wide form
    Cast {
        /// Long-form input file
        file: PathBuf,

        /// Column whose distinct values become the new columns
        #[arg(short, long)]
        key: String,

        /// Column providing the cell values of the new columns
        #[arg(short, long)]
        value: String,

        /// How to combine sub-tables on the fixed columns: outer or inner
        #[arg(short, long, default_value = "outer")]
        join: JoinMode,

        /// What to do when a (fixed columns, key) combination repeats:
        /// reject or first
        #[arg(short, long, default_value = "reject")]
        duplicates: DuplicatePolicy,

        /// Output format: terminal, csv, or json
        #[arg(short, long, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Check whether two tables are equivalent up to row/column order
    Check {
        /// First file to compare
        left: PathBuf,

        /// Second file to compare
        right: PathBuf,

        /// Treat null cells as distinct from each other
        #[arg(long)]
        nulls_distinct: bool,
    },

    /// Print the canonical form of a table
    Canon {
        /// Input file
        file: PathBuf,

        /// Output format: terminal, csv, or json
        #[arg(short, long, default_value = "terminal")]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(equivalent) => {
            if equivalent {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1) // Tables are not equivalent
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    match cli.command {
        Command::Cast {
            file,
            key,
            value,
            join,
            duplicates,
            format,
        } => {
            let table = load_table(&file)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            let opts = CastOptions::new()
                .with_join(join)
                .with_duplicates(duplicates);
            let wide = cast(&table, &key, &value, &opts)
                .with_context(|| format!("Failed to cast {}", file.display()))?;
            render_to_stdout(&wide, format)?;
            Ok(true)
        }
        Command::Check {
            left,
            right,
            nulls_distinct,
        } => {
            let table_a = load_table(&left)
                .with_context(|| format!("Failed to load {}", left.display()))?;
            let table_b = load_table(&right)
                .with_context(|| format!("Failed to load {}", right.display()))?;
            let null_equality = if nulls_distinct {
                NullEquality::Distinct
            } else {
                NullEquality::Equal
            };
            let opts = EquivOptions::new().with_null_equality(null_equality);
            let result = equivalent_with(&table_a, &table_b, &opts)?;
            write_verdict(result)?;
            Ok(result)
        }
        Command::Canon { file, format } => {
            let table = load_table(&file)
                .with_context(|| format!("Failed to load {}", file.display()))?;
            let canon = canonicalize(&table)?;
            render_to_stdout(&canon, format)?;
            Ok(true)
        }
    }
}
