//! Cell values and raw rows.
//!
//! Workbook cells are heterogeneous; [`CellValue`] models them as a closed
//! tagged union so every downstream coercion can match exhaustively instead
//! of sniffing at runtime.

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

/// A single cell value, tagged by type.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Non-empty text.
    Text(String),
    /// Any numeric cell (integers are widened to f64).
    Number(f64),
    /// Boolean cell.
    Bool(bool),
    /// Date or date-time cell.
    Date(NaiveDateTime),
    /// Empty or unusable cell.
    Null,
}

impl CellValue {
    /// True for cells that carry no data.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Build a cell from a delimited-text field. Whitespace-only fields
    /// become [`CellValue::Null`]; everything else stays verbatim text so
    /// no client data is lost before classification.
    pub fn from_text(field: &str) -> Self {
        if field.trim().is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(field.to_string())
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Null,
            Data::String(s) => CellValue::from_text(s),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => CellValue::Date(naive),
                // Serial value with no calendar interpretation.
                None => CellValue::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) => parse_iso(s)
                .map(CellValue::Date)
                .unwrap_or_else(|| CellValue::from_text(s)),
            Data::DurationIso(s) => CellValue::from_text(s),
            // Cell-level errors (#N/A, #DIV/0!) carry no importable data.
            Data::Error(_) => CellValue::Null,
        }
    }
}

/// One source row: original column name to cell value, in column order.
pub type RawRow = IndexMap<String, CellValue>;

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_blank_is_null() {
        assert_eq!(CellValue::from_text(""), CellValue::Null);
        assert_eq!(CellValue::from_text("   "), CellValue::Null);
        assert_eq!(
            CellValue::from_text("fragile"),
            CellValue::Text("fragile".to_string())
        );
    }

    #[test]
    fn test_from_calamine_scalars() {
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Null);
        assert_eq!(CellValue::from(&Data::Int(12)), CellValue::Number(12.0));
        assert_eq!(CellValue::from(&Data::Float(0.25)), CellValue::Number(0.25));
        assert_eq!(CellValue::from(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(
            CellValue::from(&Data::String("  ".to_string())),
            CellValue::Null
        );
    }

    #[test]
    fn test_from_calamine_iso_datetime() {
        let cell = Data::DateTimeIso("2026-03-01T08:30:00".to_string());
        match CellValue::from(&cell) {
            CellValue::Date(dt) => {
                assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2026-03-01 08:30")
            }
            other => panic!("expected date, got {other:?}"),
        }
    }

    #[test]
    fn test_from_calamine_iso_date_only() {
        let cell = Data::DateTimeIso("2026-03-01".to_string());
        assert!(matches!(CellValue::from(&cell), CellValue::Date(_)));
    }

    #[test]
    fn test_cell_error_is_null() {
        let cell = Data::Error(calamine::CellErrorType::Div0);
        assert_eq!(CellValue::from(&cell), CellValue::Null);
    }
}
