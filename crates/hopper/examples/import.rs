//! Example: Import a warehouse workbook with Hopper.
//!
//! Usage:
//!   cargo run --example import -- <file_path>
//!
//! Example:
//!   cargo run --example import -- test_data/locations.xlsx

use std::env;
use std::path::Path;

use hopper::{Importer, ParsedRow, StreamHooks};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example import -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let bytes = std::fs::read(path).expect("failed to read file");

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Hopper Import: {}", file_path);
    println!("{}", separator);
    println!();

    let importer = Importer::new();

    let mut hooks = StreamHooks::new().on_progress(|progress| {
        println!(
            "  chunk {}/{}: {} processed, {} skipped ({:.0}%)",
            progress.current_chunk,
            progress.total_chunks,
            progress.processed_rows,
            progress.skipped_rows,
            progress.percent
        );
        Ok(())
    });

    let report = match importer.import_streaming(&bytes, &mut hooks) {
        Ok(report) => report,
        Err(failure) => {
            eprintln!("{}: {}", failure.code, failure.message);
            std::process::exit(1);
        }
    };
    drop(hooks);

    println!();
    println!("## Metadata");
    println!("  Sheet: {}", report.metadata.sheet_name);
    println!("  Schema: {}", report.metadata.schema_kind);
    println!("  Format: {}", report.metadata.source.format);
    println!("  Columns: {:?}", report.metadata.detected_columns);
    if !report.metadata.extra_columns.is_empty() {
        println!("  Extra columns: {:?}", report.metadata.extra_columns);
    }
    println!();

    println!("## Mapping");
    for (client, field) in &report.metadata.column_mapping {
        println!("  {:25} -> {}", client, field);
    }
    println!();

    println!("## First rows");
    for row in report.data.iter().take(5) {
        match row {
            ParsedRow::Pick(pick) => println!(
                "  {} x{} @ {}",
                pick.article_number, pick.quantity, pick.location
            ),
            ParsedRow::Location(location) => println!(
                "  {} [{}] layout={}",
                location.location_code, location.zone, location.capacity_layout
            ),
        }
    }
    println!();

    println!("## Summary");
    println!(
        "  {} of {} rows imported ({} skipped) in {} ms",
        report.processed_rows, report.total_rows, report.skipped_rows, report.elapsed_ms
    );
    println!("{}", separator);
}
