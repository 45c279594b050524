//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use hopper::SchemaKind;

/// Hopper: warehouse spreadsheet import tool
#[derive(Parser)]
#[command(name = "hopper")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List sheets with their headers and row counts
    Inspect {
        /// Path to the workbook (xlsx/xls/ods/csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Sheet name or zero-based index (default: all sheets)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// Preview the auto-detected column mapping
    Detect {
        /// Path to the workbook
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Sheet name or zero-based index (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Target schema (default: auto-detect)
        #[arg(long)]
        schema: Option<SchemaArg>,

        /// Minimum similarity for fuzzy matches
        #[arg(long, default_value_t = 0.7)]
        threshold: f64,
    },

    /// Import a workbook into canonical records
    Import {
        /// Path to the workbook
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Sheet name or zero-based index (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Target schema (default: auto-detect)
        #[arg(long)]
        schema: Option<SchemaArg>,

        /// Cap on rows to import (0 = unlimited)
        #[arg(long, default_value_t = 0)]
        max_rows: usize,

        /// Rows per chunk
        #[arg(long, default_value_t = 10_000)]
        chunk_size: usize,

        /// First sheet row to import (row 0 is the header)
        #[arg(long, default_value_t = 1)]
        start_row: usize,

        /// Write the full report as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Schema choice on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaArg {
    Pick,
    Location,
}

impl From<SchemaArg> for SchemaKind {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Pick => SchemaKind::Pick,
            SchemaArg::Location => SchemaKind::Location,
        }
    }
}
