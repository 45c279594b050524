//! Error types for the Hopper library.
//!
//! Run-level failures carry a stable machine-readable code (see
//! [`ImportError::code`]) so callers can branch without string-matching
//! display output. Row-level problems are not errors: the orchestrator
//! counts them as skips and keeps going.

use thiserror::Error;

/// Main error type for Hopper operations.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The requested sheet name or index does not exist in the workbook.
    #[error("sheet not found: '{requested}'")]
    SheetNotFound { requested: String },

    /// The byte buffer is not a readable workbook.
    #[error("unreadable workbook buffer: {0}")]
    Workbook(#[from] calamine::Error),

    /// Error from the CSV library while reading a delimited buffer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The buffer contains no sheets or no cells at all.
    #[error("empty workbook: {0}")]
    EmptyWorkbook(String),

    /// The sheet has no header row to map columns from.
    #[error("sheet '{sheet}' has no header row")]
    MissingHeader { sheet: String },

    /// A chunk or progress callback returned an error (cooperative abort).
    #[error("callback aborted the import: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A numeric field could not be parsed and the number policy is
    /// [`NumberPolicy::Error`](crate::NumberPolicy::Error).
    #[error("row {row}: column '{column}' is not numeric: '{value}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

impl ImportError {
    /// Stable error code for this failure class.
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::SheetNotFound { .. } => "SHEET_NOT_FOUND",
            ImportError::Workbook(_) => "UNREADABLE_BUFFER",
            ImportError::EmptyWorkbook(_) => "EMPTY_WORKBOOK",
            ImportError::MissingHeader { .. } => "MISSING_HEADER",
            ImportError::Callback(_) => "CALLBACK_ABORTED",
            ImportError::Csv(_) | ImportError::InvalidNumber { .. } => "PARSE_ERROR",
        }
    }
}

/// Result type alias for Hopper operations.
pub type Result<T> = std::result::Result<T, ImportError>;
