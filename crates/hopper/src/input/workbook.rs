//! Workbook opening, sheet enumeration, and metadata inspection.
//!
//! A [`Workbook`] borrows the caller's byte buffer read-only. Binary
//! containers (xlsx/xls/xlsb/ods) go through calamine; anything that looks
//! like delimited text is exposed as a single synthetic sheet.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Sheets};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::cell::{CellValue, RawRow};
use super::delimited::{self, DelimitedTable, DELIMITED_SHEET_NAME};
use crate::error::{ImportError, Result};

/// Identifies a sheet by name or zero-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRef {
    /// Sheet by exact name.
    Name(String),
    /// Sheet by zero-based position.
    Index(usize),
}

impl Default for SheetRef {
    fn default() -> Self {
        SheetRef::Index(0)
    }
}

impl From<&str> for SheetRef {
    fn from(name: &str) -> Self {
        SheetRef::Name(name.to_string())
    }
}

impl From<usize> for SheetRef {
    fn from(index: usize) -> Self {
        SheetRef::Index(index)
    }
}

impl std::fmt::Display for SheetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetRef::Name(name) => write!(f, "{name}"),
            SheetRef::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// Metadata about the source buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Detected container format (xlsx, xls, ods, csv, tsv, ...).
    pub format: String,
    /// Buffer size in bytes.
    pub size_bytes: u64,
    /// SHA-256 fingerprint of the buffer.
    pub hash: String,
}

/// Header and row-count metadata for one sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetInfo {
    /// Sheet name.
    pub name: String,
    /// Ordered header names.
    pub headers: Vec<String>,
    /// Estimated data-row count (header excluded), from the sheet's
    /// declared range.
    pub data_rows: usize,
}

/// An open workbook over a borrowed byte buffer.
pub struct Workbook<'a> {
    bytes: &'a [u8],
    backend: Backend<'a>,
    sheet_names: Vec<String>,
    source: SourceInfo,
}

enum Backend<'a> {
    Spreadsheet(Sheets<Cursor<&'a [u8]>>),
    Delimited,
}

impl<'a> Workbook<'a> {
    /// Open a workbook from an in-memory buffer.
    ///
    /// The buffer is treated as read-only; nothing is copied out of it
    /// until a sheet is read.
    pub fn open(bytes: &'a [u8]) -> Result<Workbook<'a>> {
        if bytes.is_empty() {
            return Err(ImportError::EmptyWorkbook("buffer is empty".to_string()));
        }

        let source = |format: &str| SourceInfo {
            format: format.to_string(),
            size_bytes: bytes.len() as u64,
            hash: fingerprint(bytes),
        };

        match calamine::open_workbook_auto_from_rs(Cursor::new(bytes)) {
            Ok(sheets) => {
                let names = sheets.sheet_names().to_vec();
                if names.is_empty() {
                    return Err(ImportError::EmptyWorkbook(
                        "workbook contains no sheets".to_string(),
                    ));
                }
                let format = match &sheets {
                    Sheets::Xls(_) => "xls",
                    Sheets::Xlsx(_) => "xlsx",
                    Sheets::Xlsb(_) => "xlsb",
                    Sheets::Ods(_) => "ods",
                };
                Ok(Workbook {
                    bytes,
                    backend: Backend::Spreadsheet(sheets),
                    sheet_names: names,
                    source: source(format),
                })
            }
            Err(err) => {
                if !delimited::looks_like_text(bytes) {
                    return Err(err.into());
                }
                // Probe the delimiter up front so format metadata is stable.
                let (_, _, delimiter) = DelimitedTable::inspect(bytes)?;
                Ok(Workbook {
                    bytes,
                    backend: Backend::Delimited,
                    sheet_names: vec![DELIMITED_SHEET_NAME.to_string()],
                    source: source(DelimitedTable::format_name(delimiter)),
                })
            }
        }
    }

    /// Metadata about the underlying buffer.
    pub fn source(&self) -> &SourceInfo {
        &self.source
    }

    /// Ordered sheet names.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Resolve a sheet reference to its name.
    pub fn resolve(&self, sheet: &SheetRef) -> Result<String> {
        let name = match sheet {
            SheetRef::Name(name) => self
                .sheet_names
                .iter()
                .find(|candidate| *candidate == name)
                .cloned(),
            SheetRef::Index(index) => self.sheet_names.get(*index).cloned(),
        };
        name.ok_or_else(|| ImportError::SheetNotFound {
            requested: sheet.to_string(),
        })
    }

    /// Header names and estimated row count for a sheet, without keeping
    /// any row data around. For delimited buffers this is a pure scan.
    pub fn inspect(&mut self, sheet: &SheetRef) -> Result<SheetInfo> {
        let name = self.resolve(sheet)?;
        match &mut self.backend {
            Backend::Spreadsheet(sheets) => {
                let range = sheets.worksheet_range(&name)?;
                if range.height() == 0 {
                    return Err(ImportError::MissingHeader { sheet: name });
                }
                let headers = header_names(&range);
                let data_rows = range.height() - 1;
                Ok(SheetInfo {
                    name,
                    headers,
                    data_rows,
                })
            }
            Backend::Delimited => {
                let (headers, data_rows, _) = DelimitedTable::inspect(self.bytes)?;
                Ok(SheetInfo {
                    name,
                    headers: placeholder_blank_headers(headers),
                    data_rows,
                })
            }
        }
    }

    /// Read a sheet for import. The returned [`SheetData`] owns the cell
    /// grid; raw rows are produced lazily, window by window.
    pub fn read_sheet(&mut self, sheet: &SheetRef) -> Result<SheetData> {
        let name = self.resolve(sheet)?;
        match &mut self.backend {
            Backend::Spreadsheet(sheets) => {
                let range = sheets.worksheet_range(&name)?;
                if range.height() == 0 {
                    return Err(ImportError::MissingHeader { sheet: name });
                }
                let headers = header_names(&range);
                Ok(SheetData {
                    name,
                    headers,
                    grid: Grid::Cells(range),
                })
            }
            Backend::Delimited => {
                let table = DelimitedTable::parse(self.bytes)?;
                let headers = placeholder_blank_headers(table.headers.clone());
                Ok(SheetData {
                    name,
                    headers,
                    grid: Grid::Text(table.rows),
                })
            }
        }
    }
}

/// A materialized sheet ready for chunked iteration.
///
/// Row indices follow sheet coordinates: row 0 is the header, data rows
/// start at 1.
pub struct SheetData {
    /// Sheet name.
    pub name: String,
    /// Ordered header names (blank headers get positional placeholders).
    pub headers: Vec<String>,
    grid: Grid,
}

enum Grid {
    Cells(Range<Data>),
    Text(Vec<Vec<String>>),
}

impl SheetData {
    /// Number of data rows (header excluded).
    pub fn data_row_count(&self) -> usize {
        match &self.grid {
            Grid::Cells(range) => range.height().saturating_sub(1),
            Grid::Text(rows) => rows.len(),
        }
    }

    /// Convert the window `[start, end)` of sheet rows into raw rows.
    /// `start` must be at least 1 (row 0 is the header).
    pub fn raw_rows(&self, start: usize, end: usize) -> Vec<RawRow> {
        debug_assert!(start >= 1);
        match &self.grid {
            Grid::Cells(range) => range
                .rows()
                .skip(start)
                .take(end.saturating_sub(start))
                .map(|cells| {
                    self.headers
                        .iter()
                        .zip(cells.iter())
                        .map(|(header, cell)| (header.clone(), CellValue::from(cell)))
                        .collect()
                })
                .collect(),
            Grid::Text(rows) => rows
                .iter()
                .skip(start - 1)
                .take(end.saturating_sub(start))
                .map(|fields| {
                    self.headers
                        .iter()
                        .zip(fields.iter())
                        .map(|(header, field)| (header.clone(), CellValue::from_text(field)))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Stringify the header row, substituting positional placeholders for
/// blank header cells so every column stays addressable.
fn header_names(range: &Range<Data>) -> Vec<String> {
    let headers = range
        .rows()
        .next()
        .map(|cells| {
            cells
                .iter()
                .map(|cell| match cell {
                    Data::String(s) => s.trim().to_string(),
                    Data::Empty => String::new(),
                    other => other.to_string().trim().to_string(),
                })
                .collect()
        })
        .unwrap_or_default();
    placeholder_blank_headers(headers)
}

fn placeholder_blank_headers(headers: Vec<String>) -> Vec<String> {
    headers
        .into_iter()
        .enumerate()
        .map(|(idx, header)| {
            if header.trim().is_empty() {
                format!("column_{}", idx + 1)
            } else {
                header
            }
        })
        .collect()
}

fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &[u8] = b"sku,qty,loc\nA-1,5,R01\nB-2,3,R02\n";

    #[test]
    fn test_open_delimited_buffer() {
        let workbook = Workbook::open(CSV).unwrap();
        assert_eq!(workbook.sheet_names(), ["Sheet1"]);
        assert_eq!(workbook.source().format, "csv");
        assert!(workbook.source().hash.starts_with("sha256:"));
    }

    #[test]
    fn test_open_empty_buffer() {
        let err = Workbook::open(b"").unwrap_err();
        assert_eq!(err.code(), "EMPTY_WORKBOOK");
    }

    #[test]
    fn test_open_binary_garbage() {
        let bytes = [0u8, 159, 146, 150, 0, 1, 2, 3];
        let err = Workbook::open(&bytes).unwrap_err();
        assert_eq!(err.code(), "UNREADABLE_BUFFER");
    }

    #[test]
    fn test_resolve_by_name_and_index() {
        let workbook = Workbook::open(CSV).unwrap();
        assert_eq!(workbook.resolve(&SheetRef::Index(0)).unwrap(), "Sheet1");
        assert_eq!(
            workbook.resolve(&SheetRef::from("Sheet1")).unwrap(),
            "Sheet1"
        );

        let err = workbook
            .resolve(&SheetRef::from("Nonexistent"))
            .unwrap_err();
        assert_eq!(err.code(), "SHEET_NOT_FOUND");
    }

    #[test]
    fn test_inspect_delimited() {
        let mut workbook = Workbook::open(CSV).unwrap();
        let info = workbook.inspect(&SheetRef::default()).unwrap();
        assert_eq!(info.headers, vec!["sku", "qty", "loc"]);
        assert_eq!(info.data_rows, 2);
    }

    #[test]
    fn test_raw_rows_window() {
        let mut workbook = Workbook::open(CSV).unwrap();
        let sheet = workbook.read_sheet(&SheetRef::default()).unwrap();
        assert_eq!(sheet.data_row_count(), 2);

        let rows = sheet.raw_rows(1, 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get("sku"),
            Some(&CellValue::Text("A-1".to_string()))
        );

        // Window past the end is clamped.
        let rows = sheet.raw_rows(2, 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get("loc"),
            Some(&CellValue::Text("R02".to_string()))
        );
    }

    #[test]
    fn test_blank_headers_get_placeholders() {
        let data = b"sku,,qty\nA,x,1\n";
        let mut workbook = Workbook::open(data).unwrap();
        let sheet = workbook.read_sheet(&SheetRef::default()).unwrap();
        assert_eq!(sheet.headers, vec!["sku", "column_2", "qty"]);
    }
}
