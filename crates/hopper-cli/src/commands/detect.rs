//! `hopper detect` - preview the auto-detected column mapping.

use std::error::Error;
use std::path::PathBuf;

use colored::Colorize;
use hopper::{ImportOptions, Importer, Workbook};

use super::parse_sheet_ref;
use crate::cli::SchemaArg;

pub fn run(
    file: PathBuf,
    sheet: Option<String>,
    schema: Option<SchemaArg>,
    threshold: f64,
) -> Result<(), Box<dyn Error>> {
    let bytes = std::fs::read(&file)?;
    let sheet = parse_sheet_ref(sheet);

    let mut workbook = Workbook::open(&bytes)?;
    let info = workbook.inspect(&sheet)?;

    let importer = Importer::with_options(ImportOptions {
        sheet,
        schema_kind: schema.map(Into::into),
        similarity_threshold: threshold,
        ..Default::default()
    });
    let report = importer.detect_mapping(&info.headers);

    println!(
        "{} {} (confidence {:.0}%)",
        "Schema:".bold(),
        report.schema_kind.to_string().green(),
        report.confidence * 100.0
    );

    println!();
    for mapping in &report.mappings {
        let confidence = format!("{:.0}%", mapping.confidence * 100.0);
        let confidence = if mapping.confidence >= 1.0 {
            confidence.green()
        } else {
            confidence.yellow()
        };
        println!(
            "  {} -> {}  [{}] {}",
            mapping.client_column.bold(),
            mapping.template_field,
            confidence,
            mapping.reason.dimmed()
        );
    }

    if !report.missing_columns.is_empty() {
        println!();
        println!("{}", "Missing canonical fields:".red().bold());
        for field in &report.missing_columns {
            println!("  {}", field.red());
        }
    }

    if !report.unmapped_columns.is_empty() {
        println!();
        println!("{}", "Unmapped columns (kept as extra dimensions):".bold());
        for column in &report.unmapped_columns {
            println!("  {}", column.dimmed());
        }
    }

    Ok(())
}
