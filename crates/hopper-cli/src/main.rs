//! Hopper CLI - warehouse spreadsheet import tool.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("hopper=debug")
            .with_target(false)
            .init();
    }

    let result = match cli.command {
        Commands::Inspect { file, sheet } => commands::inspect::run(file, sheet),

        Commands::Detect {
            file,
            sheet,
            schema,
            threshold,
        } => commands::detect::run(file, sheet, schema, threshold),

        Commands::Import {
            file,
            sheet,
            schema,
            max_rows,
            chunk_size,
            start_row,
            output,
        } => commands::import::run(
            file,
            sheet,
            schema,
            max_rows,
            chunk_size,
            start_row,
            output,
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
