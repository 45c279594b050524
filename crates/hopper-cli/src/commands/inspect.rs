//! `hopper inspect` - list sheets, headers, and row counts.

use std::error::Error;
use std::path::PathBuf;

use colored::Colorize;
use hopper::{SheetRef, Workbook};

use super::parse_sheet_ref;

pub fn run(file: PathBuf, sheet: Option<String>) -> Result<(), Box<dyn Error>> {
    let bytes = std::fs::read(&file)?;
    let mut workbook = Workbook::open(&bytes)?;

    let source = workbook.source().clone();
    println!(
        "{} {} ({}, {} bytes)",
        "Workbook:".bold(),
        file.display(),
        source.format,
        source.size_bytes
    );

    let targets: Vec<SheetRef> = match sheet {
        Some(_) => vec![parse_sheet_ref(sheet)],
        None => (0..workbook.sheet_names().len())
            .map(SheetRef::Index)
            .collect(),
    };

    for target in targets {
        let info = workbook.inspect(&target)?;
        println!();
        println!(
            "{} {} ({} data rows)",
            "Sheet:".bold(),
            info.name.green(),
            info.data_rows
        );
        for (idx, header) in info.headers.iter().enumerate() {
            println!("  {:>3}  {}", idx, header);
        }
    }

    Ok(())
}
