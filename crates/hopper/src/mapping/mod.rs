//! Fuzzy column mapping between client headers and canonical fields.

mod detect;
mod normalize;

use indexmap::IndexMap;

pub use detect::{detect, detect_for, DetectedMapping, MappingReport, DEFAULT_SIMILARITY_THRESHOLD};
pub use normalize::{normalize, similarity};

/// Resolved client-column → canonical-field mapping, in column order.
///
/// Intended to be injective (each canonical field claimed by at most one
/// client column); construction does not enforce it.
pub type ColumnMapping = IndexMap<String, String>;
