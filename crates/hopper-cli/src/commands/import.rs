//! `hopper import` - run a streaming import with a progress bar.

use std::error::Error;
use std::path::PathBuf;

use colored::Colorize;
use hopper::{ImportOptions, Importer, StreamHooks};
use indicatif::{ProgressBar, ProgressStyle};

use super::parse_sheet_ref;
use crate::cli::SchemaArg;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    sheet: Option<String>,
    schema: Option<SchemaArg>,
    max_rows: usize,
    chunk_size: usize,
    start_row: usize,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {
    let bytes = std::fs::read(&file)?;

    let importer = Importer::with_options(ImportOptions {
        sheet: parse_sheet_ref(sheet),
        schema_kind: schema.map(Into::into),
        max_rows,
        chunk_size,
        start_row,
        debug: verbose,
        ..Default::default()
    });

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} rows ({percent}%, eta {eta})",
        )
        .expect("valid progress template"),
    );

    let mut hooks = StreamHooks::new().on_progress(|progress| {
        bar.set_length(progress.total_rows as u64);
        bar.set_position((progress.processed_rows + progress.skipped_rows) as u64);
        Ok(())
    });

    let result = importer.import_streaming(&bytes, &mut hooks);
    drop(hooks);
    bar.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(failure) => {
            eprintln!("{} {}", failure.code.red().bold(), failure.message);
            return Err(Box::new(failure));
        }
    };

    println!(
        "{} {} rows into {} ({} skipped) in {} ms",
        "Imported".green().bold(),
        report.processed_rows,
        report.metadata.schema_kind,
        report.skipped_rows,
        report.elapsed_ms
    );
    if !report.metadata.extra_columns.is_empty() {
        println!(
            "Extra columns preserved: {}",
            report.metadata.extra_columns.join(", ").dimmed()
        );
    }

    if let Some(path) = output {
        let writer = std::io::BufWriter::new(std::fs::File::create(&path)?);
        serde_json::to_writer_pretty(writer, &report)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
