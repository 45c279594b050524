//! CLI subcommand implementations.

pub mod detect;
pub mod import;
pub mod inspect;

use hopper::SheetRef;

/// Parse a `--sheet` argument: a bare integer is a zero-based index,
/// anything else is a sheet name.
pub(crate) fn parse_sheet_ref(sheet: Option<String>) -> SheetRef {
    match sheet {
        None => SheetRef::default(),
        Some(s) => match s.parse::<usize>() {
            Ok(index) => SheetRef::Index(index),
            Err(_) => SheetRef::Name(s),
        },
    }
}
