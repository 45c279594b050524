//! Scalar coercion and extra-dimension type classification.
//!
//! Every coercion matches exhaustively on the [`CellValue`] tag; there is
//! no dynamic sniffing past this module.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::input::CellValue;

/// What to do when a numeric field holds an unparseable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberPolicy {
    /// Coerce to `0.0`. The historical behavior; masks "invalid" as zero
    /// but never fails a row.
    #[default]
    DefaultZero,
    /// Count the row as skipped.
    SkipRow,
    /// Abort the run with a parse failure.
    Error,
}

/// Inferred type tag of an extra dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionType {
    String,
    Number,
    Date,
    Boolean,
}

// Quick gates for date-looking strings; full parsing happens in chrono.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap(),
        Regex::new(r"^\d{4}/\d{2}/\d{2}").unwrap(),
        Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}").unwrap(),
        Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}").unwrap(),
    ]
});

/// Coerce a cell into a text field. Null and absent cells become the empty
/// string; dates render as round-trippable ISO-8601.
pub fn coerce_text(value: Option<&CellValue>) -> String {
    match value {
        None | Some(CellValue::Null) => String::new(),
        Some(CellValue::Text(s)) => s.clone(),
        Some(CellValue::Number(n)) => format_number(*n),
        Some(CellValue::Bool(b)) => b.to_string(),
        Some(CellValue::Date(dt)) => format_iso(dt),
    }
}

/// Coerce a cell into a numeric field. Numbers pass through; numeric-looking
/// strings are parsed after stripping thousands separators. Null and absent
/// cells are zero. Anything else is returned as the offending rendering for
/// the caller's [`NumberPolicy`] to decide on.
pub fn coerce_number(value: Option<&CellValue>) -> Result<f64, String> {
    match value {
        None | Some(CellValue::Null) => Ok(0.0),
        Some(CellValue::Number(n)) => Ok(*n),
        Some(CellValue::Text(s)) => parse_number(s).ok_or_else(|| s.clone()),
        Some(CellValue::Bool(b)) => Err(b.to_string()),
        Some(CellValue::Date(dt)) => Err(format_iso(dt)),
    }
}

/// Classify a cell for extra-dimension preservation. Empty cells yield
/// `None`; text is classified boolean > number > date > string. The stored
/// value is the original rendering, not the classified interpretation.
pub fn classify_extra(value: &CellValue) -> Option<(String, DimensionType)> {
    match value {
        CellValue::Null => None,
        CellValue::Bool(b) => Some((b.to_string(), DimensionType::Boolean)),
        CellValue::Number(n) => Some((format_number(*n), DimensionType::Number)),
        CellValue::Date(dt) => Some((format_iso(dt), DimensionType::Date)),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            let data_type = if is_boolean_string(trimmed) {
                DimensionType::Boolean
            } else if parse_number(trimmed).is_some() {
                DimensionType::Number
            } else if parse_date_string(trimmed).is_some() {
                DimensionType::Date
            } else {
                DimensionType::String
            };
            Some((s.clone(), data_type))
        }
    }
}

/// Parse a numeric-looking string, tolerating thousands separators and
/// surrounding whitespace.
pub fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a date-looking string into a naive date-time.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    if !DATE_PATTERNS.iter().any(|p| p.is_match(s)) {
        return None;
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%d-%m-%Y %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Round-trippable ISO-8601 rendering.
pub fn format_iso(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn is_boolean_string(s: &str) -> bool {
    s.eq_ignore_ascii_case("true")
        || s.eq_ignore_ascii_case("false")
        || s.eq_ignore_ascii_case("yes")
        || s.eq_ignore_ascii_case("no")
}
