//! Delimited-text buffers (CSV/TSV and friends) as single-sheet workbooks.
//!
//! Client exports frequently arrive as CSV rather than a real workbook, so
//! delimited buffers are first-class: one synthetic sheet, delimiter
//! auto-detected from the first lines.

use std::io::{BufRead, BufReader};

use crate::error::{ImportError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Sheet name exposed for a delimited buffer.
pub const DELIMITED_SHEET_NAME: &str = "Sheet1";

/// A fully parsed delimited buffer.
#[derive(Debug, Clone)]
pub struct DelimitedTable {
    /// Header row.
    pub headers: Vec<String>,
    /// Data rows, padded/truncated to the header width.
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DelimitedTable {
    /// Parse a delimited buffer, materializing all rows.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let delimiter = detect_delimiter(bytes)?;
        let mut reader = build_reader(bytes, delimiter);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::MissingHeader {
                sheet: DELIMITED_SHEET_NAME.to_string(),
            });
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            // Ragged exports are common; normalize to the header width.
            while row.len() < expected_cols {
                row.push(String::new());
            }
            row.truncate(expected_cols);
            rows.push(row);
        }

        Ok(Self {
            headers,
            rows,
            delimiter,
        })
    }

    /// Read headers and count data rows without keeping any row data.
    pub fn inspect(bytes: &[u8]) -> Result<(Vec<String>, usize, u8)> {
        let delimiter = detect_delimiter(bytes)?;
        let mut reader = build_reader(bytes, delimiter);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::MissingHeader {
                sheet: DELIMITED_SHEET_NAME.to_string(),
            });
        }

        let mut count = 0usize;
        for record in reader.records() {
            record?;
            count += 1;
        }

        Ok((headers, count, delimiter))
    }

    /// Human-readable format name for a delimiter.
    pub fn format_name(delimiter: u8) -> &'static str {
        match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
    }
}

fn build_reader(bytes: &[u8], delimiter: u8) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes)
}

/// Heuristic check that a buffer is delimited text rather than a corrupt
/// binary container: valid UTF-8 in the sampled prefix, no NUL bytes.
pub fn looks_like_text(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }
    let sample = &bytes[..bytes.len().min(4096)];
    if sample.contains(&0) {
        return false;
    }
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        // The sample may split a multi-byte sequence at its end.
        Err(e) => e.valid_up_to() + 4 >= sample.len(),
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ImportError::EmptyWorkbook(
            "no lines to analyze".to_string(),
        ));
    }

    // Count occurrences of each delimiter in each line; a consistent count
    // across lines wins, with a slight bonus for tab (rare in actual data).
    let mut best_delimiter = b',';
    let mut best_score = 0usize;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
