//! Types shared across the annotation engine and the batch manager.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::elements::AtomicNumber;
use crate::services::annotation::summary::CorpusSummary;

/// Identifiers recognized in one keyword string.
///
/// `nuclides` and `reactions` are sorted lexicographically as strings,
/// `atomic_numbers` numerically. All three are deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationResult {
    pub nuclides: Vec<String>,
    pub reactions: Vec<String>,
    pub atomic_numbers: Vec<AtomicNumber>,
}

impl AnnotationResult {
    /// True when nothing was recognized.
    pub fn is_empty(&self) -> bool {
        self.nuclides.is_empty() && self.reactions.is_empty() && self.atomic_numbers.is_empty()
    }
}

/// Events emitted during batch annotation.
/// Used by the CLI to drive progress bars and status messages.
#[derive(Debug, Clone)]
pub enum AnnotationEvent {
    Started {
        total_records: usize,
    },
    RecordCompleted {
        record_id: String,
    },
    RecordFailed {
        record_id: String,
        error: String,
    },
    RecordSkipped {
        record_id: String,
    },
    Complete {
        succeeded: usize,
        failed: usize,
        skipped: usize,
    },
}

/// Result of a batch annotation run.
#[derive(Debug, Default)]
pub struct BatchAnnotationResult {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub summary: CorpusSummary,
}

impl BatchAnnotationResult {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }
}

/// Errors from the annotation engine.
///
/// Malformed keyword text is never an error; these cover configuration
/// problems that must stop a run before any record is processed.
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Element table is corrupt: {0}")]
    CorruptElementTable(String),

    #[error("Invalid nuclide rule {id}: {reason}")]
    InvalidRule { id: String, reason: String },
}
