//! Main import engine and public API.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ImportError, Result};
use crate::input::{SheetInfo, SheetRef, SourceInfo, Workbook};
use crate::mapping::{self, ColumnMapping, MappingReport, DEFAULT_SIMILARITY_THRESHOLD};
use crate::row::{NumberPolicy, ParsedRow, RowParser};
use crate::stream::{ChunkInfo, ParseProgress, StreamHooks, DEFAULT_CHUNK_SIZE};
use crate::template::{template_for, SchemaKind};

/// Configuration for one import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Sheet to import (default: first sheet).
    pub sheet: SheetRef,
    /// Target schema; `None` auto-detects against both templates.
    pub schema_kind: Option<SchemaKind>,
    /// Manual mapping overrides; these take precedence over auto-detected
    /// entries for the same client column.
    pub column_mapping: ColumnMapping,
    /// Cap on rows to attempt (0 = unlimited).
    pub max_rows: usize,
    /// First sheet row to attempt; row 0 is the header row.
    pub start_row: usize,
    /// Rows per chunk.
    pub chunk_size: usize,
    /// Minimum similarity for fuzzy column matches.
    pub similarity_threshold: f64,
    /// What to do with unparseable numeric values.
    pub number_policy: NumberPolicy,
    /// Advisory memory budget; not enforced by the algorithm.
    pub memory_limit_mb: usize,
    /// Emit per-chunk tracing events.
    pub debug: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            sheet: SheetRef::default(),
            schema_kind: None,
            column_mapping: ColumnMapping::new(),
            max_rows: 0,
            start_row: 1,
            chunk_size: DEFAULT_CHUNK_SIZE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            number_policy: NumberPolicy::default(),
            memory_limit_mb: 0,
            debug: false,
        }
    }
}

/// Metadata recorded with a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportMetadata {
    /// Resolved sheet name.
    pub sheet_name: String,
    /// Schema the rows were imported into.
    pub schema_kind: SchemaKind,
    /// The resolved mapping that drove the run.
    pub column_mapping: ColumnMapping,
    /// Every header present in the sheet.
    pub detected_columns: Vec<String>,
    /// Headers covered by neither the mapping nor the canonical schema.
    pub extra_columns: Vec<String>,
    /// Run start, wall clock.
    pub started_at: DateTime<Utc>,
    /// Run completion, wall clock.
    pub completed_at: DateTime<Utc>,
    /// Source buffer metadata.
    pub source: SourceInfo,
}

/// Successful outcome of one import run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    /// All successfully parsed rows, in row order.
    pub data: Vec<ParsedRow>,
    /// Rows attempted: `processed_rows + skipped_rows`.
    pub total_rows: usize,
    /// Rows parsed successfully.
    pub processed_rows: usize,
    /// Rows dropped by row-level failures.
    pub skipped_rows: usize,
    /// Wall-clock duration of the run.
    pub elapsed_ms: u64,
    pub metadata: ImportMetadata,
}

/// Failed outcome of one import run.
#[derive(Debug, Serialize)]
pub struct ImportFailure {
    /// Stable error code (see [`ImportError::code`]).
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
    /// Wall-clock duration until the failure.
    pub elapsed_ms: u64,
    /// The underlying error.
    #[serde(skip)]
    pub error: ImportError,
}

impl ImportFailure {
    fn new(error: ImportError, elapsed_ms: u64) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
            elapsed_ms,
            error,
        }
    }
}

impl std::fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ImportFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// The import engine. Owns no state beyond its options; one value per run
/// configuration, safe to reuse across independent buffers.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    /// Engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom options.
    pub fn with_options(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Header and row-count metadata for the configured sheet, without
    /// materializing row data.
    pub fn inspect(&self, bytes: &[u8]) -> Result<SheetInfo> {
        let mut workbook = Workbook::open(bytes)?;
        workbook.inspect(&self.options.sheet)
    }

    /// Propose a column mapping for a header list, honoring the configured
    /// schema kind (if any) and similarity threshold.
    pub fn detect_mapping(&self, headers: &[String]) -> MappingReport {
        match self.options.schema_kind {
            Some(kind) => mapping::detect_for(kind, headers, self.options.similarity_threshold),
            None => mapping::detect(headers, self.options.similarity_threshold),
        }
    }

    /// Import a workbook buffer without callbacks.
    pub fn import(&self, bytes: &[u8]) -> std::result::Result<ImportReport, ImportFailure> {
        self.import_streaming(bytes, &mut StreamHooks::new())
    }

    /// Import a workbook buffer, delivering chunks and progress to `hooks`.
    pub fn import_streaming(
        &self,
        bytes: &[u8],
        hooks: &mut StreamHooks<'_>,
    ) -> std::result::Result<ImportReport, ImportFailure> {
        let timer = Instant::now();
        self.run(bytes, hooks, timer)
            .map_err(|error| ImportFailure::new(error, timer.elapsed().as_millis() as u64))
    }

    fn run(
        &self,
        bytes: &[u8],
        hooks: &mut StreamHooks<'_>,
        timer: Instant,
    ) -> Result<ImportReport> {
        let options = &self.options;
        let started_at = Utc::now();

        if options.memory_limit_mb > 0
            && bytes.len() > options.memory_limit_mb * 1024 * 1024
        {
            tracing::debug!(
                size_bytes = bytes.len(),
                limit_mb = options.memory_limit_mb,
                "buffer exceeds advisory memory limit"
            );
        }

        let mut workbook = Workbook::open(bytes)?;
        let source = workbook.source().clone();
        let sheet = workbook.read_sheet(&options.sheet)?;
        let headers = sheet.headers.clone();

        // Resolve the mapping: auto-detect, then overlay manual overrides.
        let detection = self.detect_mapping(&headers);
        let schema_kind = detection.schema_kind;
        let mut mapping = detection.column_mapping();
        for (client, field) in &options.column_mapping {
            mapping.insert(client.clone(), field.clone());
        }

        tracing::debug!(
            schema = %schema_kind,
            confidence = detection.confidence,
            mapped = mapping.len(),
            missing = detection.missing_columns.len(),
            "resolved column mapping"
        );

        // Row window: data rows occupy [1, available + 1).
        let available = sheet.data_row_count();
        let data_end = available + 1;
        let start = options.start_row.max(1).min(data_end);
        let end = if options.max_rows > 0 {
            data_end.min(start + options.max_rows)
        } else {
            data_end
        };
        let total_rows = end - start;
        let chunk_size = options.chunk_size.max(1);
        let total_chunks = total_rows.div_ceil(chunk_size);

        let parser = RowParser::new(schema_kind, &mapping, options.number_policy);
        let mut data: Vec<ParsedRow> = Vec::with_capacity(total_rows);
        let mut processed_rows = 0usize;
        let mut skipped_rows = 0usize;

        for chunk_index in 0..total_chunks {
            let chunk_start = start + chunk_index * chunk_size;
            let chunk_end = (chunk_start + chunk_size).min(end);
            let raw_rows = sheet.raw_rows(chunk_start, chunk_end);

            let mut chunk_rows = Vec::with_capacity(raw_rows.len());
            for (offset, raw) in raw_rows.iter().enumerate() {
                match parser.parse(raw) {
                    Ok(parsed) => {
                        chunk_rows.push(parsed);
                        processed_rows += 1;
                    }
                    Err(err) if options.number_policy == NumberPolicy::Error => {
                        return Err(ImportError::InvalidNumber {
                            row: chunk_start + offset,
                            column: err.column,
                            value: err.value,
                        });
                    }
                    Err(err) => {
                        skipped_rows += 1;
                        tracing::debug!(row = chunk_start + offset, error = %err, "row skipped");
                    }
                }
            }

            let info = ChunkInfo {
                index: chunk_index,
                total_chunks,
                start_row: chunk_start,
                end_row: chunk_end,
            };
            if let Some(on_chunk) = hooks.on_chunk.as_mut() {
                on_chunk(&chunk_rows, &info).map_err(ImportError::Callback)?;
            }
            data.append(&mut chunk_rows);

            if let Some(on_progress) = hooks.on_progress.as_mut() {
                let progress = ParseProgress::snapshot(
                    total_rows,
                    processed_rows,
                    skipped_rows,
                    chunk_index,
                    total_chunks,
                    timer.elapsed(),
                );
                on_progress(&progress).map_err(ImportError::Callback)?;
            }

            if options.debug {
                tracing::debug!(
                    chunk = chunk_index + 1,
                    total_chunks,
                    processed_rows,
                    skipped_rows,
                    "chunk complete"
                );
            }
        }

        let template = template_for(schema_kind);
        let extra_columns: Vec<String> = headers
            .iter()
            .filter(|h| !mapping.contains_key(h.as_str()) && !template.is_canonical_field(h.as_str()))
            .cloned()
            .collect();

        Ok(ImportReport {
            data,
            total_rows,
            processed_rows,
            skipped_rows,
            elapsed_ms: timer.elapsed().as_millis() as u64,
            metadata: ImportMetadata {
                sheet_name: sheet.name,
                schema_kind,
                column_mapping: mapping,
                detected_columns: headers,
                extra_columns,
                started_at,
                completed_at: Utc::now(),
                source,
            },
        })
    }
}
