//! Hopper: streaming spreadsheet ingestion and schema auto-mapping for
//! warehouse layouts.
//!
//! Hopper imports large, inconsistently-labeled warehouse workbooks
//! (pick lists and location layouts) into two fixed canonical schemas,
//! streaming the sheet in bounded chunks so a million-row file never has
//! to fit in memory twice.
//!
//! # Core Principles
//!
//! - **Tolerant of naming**: client columns are fuzzily matched against
//!   canonical fields, with a reproducible confidence score per match.
//! - **Lossless**: columns that map to nothing are preserved per row as
//!   typed extra dimensions, never discarded.
//! - **Row failures don't abort**: a malformed row is counted and skipped;
//!   the run keeps going.
//!
//! # Example
//!
//! ```no_run
//! use hopper::Importer;
//!
//! let bytes = std::fs::read("locations.xlsx").unwrap();
//! let report = Importer::new().import(&bytes).unwrap();
//!
//! println!("Imported {} of {} rows", report.processed_rows, report.total_rows);
//! println!("Schema: {}", report.metadata.schema_kind);
//! ```

pub mod error;
pub mod input;
pub mod mapping;
pub mod row;
pub mod stream;
pub mod template;

mod importer;

pub use crate::importer::{ImportFailure, ImportMetadata, ImportOptions, ImportReport, Importer};
pub use error::{ImportError, Result};
pub use input::{CellValue, RawRow, SheetInfo, SheetRef, SourceInfo, Workbook};
pub use mapping::{ColumnMapping, DetectedMapping, MappingReport, DEFAULT_SIMILARITY_THRESHOLD};
pub use row::{DimensionType, ExtraDimension, LocationRow, NumberPolicy, ParsedRow, PickRow};
pub use stream::{ChunkInfo, HookError, ParseProgress, StreamHooks, DEFAULT_CHUNK_SIZE};
pub use template::{FieldType, SchemaKind, Template, TemplateField};
