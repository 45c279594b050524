//! Row parsing: resolved mapping + raw row → typed canonical record.

mod coerce;
mod parse;

pub use coerce::{
    classify_extra, coerce_number, coerce_text, parse_date_string, parse_number, DimensionType,
    NumberPolicy,
};
pub use parse::{ExtraDimension, LocationRow, ParsedRow, PickRow, RowError, RowParser};
