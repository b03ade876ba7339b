//! Shared pipeline progress state
//!
//! Thread-safe trackers polled by callers while a pipeline runs:
//! - IngestState: ingestion progress plus the cooperative cancel flag
//! - ExportState: export progress (no mid-run cancellation)

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Progress as a whole percentage, `round(processed / total * 100)`
fn percent_of(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((processed as f64 / total as f64) * 100.0).round() as u8
}

/// Shared state for one ingestion run
///
/// Cancellation is cooperative: the pipeline samples the flag once per file
/// boundary, so cancel latency is bounded by one file's processing time.
/// Files committed before the flag is observed stay committed.
#[derive(Clone)]
pub struct IngestState {
    /// Whether an ingestion run is active
    pub is_ingesting: Arc<AtomicBool>,
    /// Whether cancellation has been requested
    pub cancel_requested: Arc<AtomicBool>,
    /// Number of files processed so far
    pub processed: Arc<AtomicUsize>,
    /// Total files in the batch
    pub total: Arc<AtomicUsize>,
}

impl IngestState {
    pub fn new() -> Self {
        Self {
            is_ingesting: Arc::new(AtomicBool::new(false)),
            cancel_requested: Arc::new(AtomicBool::new(false)),
            processed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Begin a run: counters restart, the cancel flag is left alone.
    /// Clearing cancellation is the caller's call, made by starting a fresh
    /// `IngestState` for the next batch.
    pub fn reset(&self, total: usize) {
        self.is_ingesting.store(true, Ordering::SeqCst);
        self.processed.store(0, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
    }

    pub fn finish(&self) {
        self.is_ingesting.store(false, Ordering::SeqCst);
    }

    pub fn is_ingesting(&self) -> bool {
        self.is_ingesting.load(Ordering::SeqCst)
    }

    /// Request cancellation of the current run
    pub fn request_cancel(&self) {
        self.cancel_requested.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel_requested.load(Ordering::SeqCst)
    }

    /// Mark one file as processed
    pub fn complete_one(&self) {
        self.processed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn progress(&self) -> (usize, usize) {
        (
            self.processed.load(Ordering::SeqCst),
            self.total.load(Ordering::SeqCst),
        )
    }

    pub fn percent(&self) -> u8 {
        let (processed, total) = self.progress();
        percent_of(processed, total)
    }
}

impl Default for IngestState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state for one export run
#[derive(Clone)]
pub struct ExportState {
    /// Whether an export run is active
    pub is_exporting: Arc<AtomicBool>,
    /// Files handled so far, including skipped ones
    pub processed: Arc<AtomicUsize>,
    /// Files skipped because their bytes could not be read
    pub skipped: Arc<AtomicUsize>,
    /// Total files in the included set, computed once up front
    pub total: Arc<AtomicUsize>,
}

impl ExportState {
    pub fn new() -> Self {
        Self {
            is_exporting: Arc::new(AtomicBool::new(false)),
            processed: Arc::new(AtomicUsize::new(0)),
            skipped: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn reset(&self, total: usize) {
        self.is_exporting.store(true, Ordering::SeqCst);
        self.processed.store(0, Ordering::SeqCst);
        self.skipped.store(0, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
    }

    pub fn finish(&self) {
        self.is_exporting.store(false, Ordering::SeqCst);
    }

    pub fn is_exporting(&self) -> bool {
        self.is_exporting.load(Ordering::SeqCst)
    }

    /// Mark one file as handled (archived or skipped)
    pub fn complete_one(&self) {
        self.processed.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a skipped file
    pub fn skip_one(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    pub fn progress(&self) -> (usize, usize, usize) {
        (
            self.processed.load(Ordering::SeqCst),
            self.skipped.load(Ordering::SeqCst),
            self.total.load(Ordering::SeqCst),
        )
    }

    pub fn percent(&self) -> u8 {
        let (processed, _, total) = self.progress();
        percent_of(processed, total)
    }
}

impl Default for ExportState {
    fn default() -> Self {
        Self::new()
    }
}
