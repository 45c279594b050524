//! Chunked-streaming types: windows, progress snapshots, and hooks.

use std::time::Duration;

use serde::Serialize;

use crate::row::ParsedRow;

/// Default rows per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Bounds of one processed window, in sheet coordinates (row 0 is the
/// header row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkInfo {
    /// Zero-based chunk index.
    pub index: usize,
    /// Total number of chunks in this run.
    pub total_chunks: usize,
    /// First row of the window (inclusive).
    pub start_row: usize,
    /// End of the window (exclusive).
    pub end_row: usize,
}

/// Cumulative progress counters, emitted after each chunk. Transient:
/// emitted only, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ParseProgress {
    /// Rows this run will attempt in total.
    pub total_rows: usize,
    /// Successfully parsed rows so far.
    pub processed_rows: usize,
    /// Rows skipped so far.
    pub skipped_rows: usize,
    /// One-based index of the chunk that just completed.
    pub current_chunk: usize,
    /// Total number of chunks in this run.
    pub total_chunks: usize,
    /// Attempted share of `total_rows`, 0–100.
    pub percent: f64,
    /// Wall-clock time since the run started.
    pub elapsed_ms: u64,
    /// `elapsed * (total - processed) / processed`; `None` until at least
    /// one row has been processed.
    pub remaining_ms: Option<u64>,
}

impl ParseProgress {
    pub(crate) fn snapshot(
        total_rows: usize,
        processed_rows: usize,
        skipped_rows: usize,
        chunk_index: usize,
        total_chunks: usize,
        elapsed: Duration,
    ) -> Self {
        let attempted = processed_rows + skipped_rows;
        let percent = if total_rows == 0 {
            100.0
        } else {
            attempted as f64 / total_rows as f64 * 100.0
        };
        let elapsed_ms = elapsed.as_millis() as u64;
        let remaining_ms = if processed_rows == 0 {
            None
        } else {
            let left = total_rows.saturating_sub(processed_rows);
            Some((elapsed_ms as f64 * left as f64 / processed_rows as f64) as u64)
        };

        Self {
            total_rows,
            processed_rows,
            skipped_rows,
            current_chunk: chunk_index + 1,
            total_chunks,
            percent,
            elapsed_ms,
            remaining_ms,
        }
    }
}

/// Error type callbacks may return to abort the run cooperatively.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

type ChunkFn<'a> = dyn FnMut(&[ParsedRow], &ChunkInfo) -> Result<(), HookError> + 'a;
type ProgressFn<'a> = dyn FnMut(&ParseProgress) -> Result<(), HookError> + 'a;

/// Optional per-chunk and per-run callbacks for a streaming import.
///
/// Chunks are delivered strictly in order and the orchestrator blocks on
/// each callback before moving on, so ordered side effects (incremental
/// persistence, progress UIs) see rows in row order. Returning an error
/// from either callback halts the run with a `CALLBACK_ABORTED` failure.
#[derive(Default)]
pub struct StreamHooks<'a> {
    pub(crate) on_chunk: Option<Box<ChunkFn<'a>>>,
    pub(crate) on_progress: Option<Box<ProgressFn<'a>>>,
}

impl<'a> StreamHooks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive each window's parsed rows and bounds.
    pub fn on_chunk(
        mut self,
        hook: impl FnMut(&[ParsedRow], &ChunkInfo) -> Result<(), HookError> + 'a,
    ) -> Self {
        self.on_chunk = Some(Box::new(hook));
        self
    }

    /// Receive cumulative counters after each window.
    pub fn on_progress(
        mut self,
        hook: impl FnMut(&ParseProgress) -> Result<(), HookError> + 'a,
    ) -> Self {
        self.on_progress = Some(Box::new(hook));
        self
    }
}
