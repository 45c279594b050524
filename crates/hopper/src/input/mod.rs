//! Workbook reading: byte buffers in, sheets and raw rows out.

mod cell;
mod delimited;
mod workbook;

pub use cell::{CellValue, RawRow};
pub use delimited::DelimitedTable;
pub use workbook::{SheetData, SheetInfo, SheetRef, SourceInfo, Workbook};
