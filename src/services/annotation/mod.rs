//! Annotation pipeline for NSR keyword strings.
//!
//! `KeywordAnnotator` runs the nuclide rules, the reaction pattern, and the
//! atomic-number resolver over one string. The `AnnotationManager` provides a
//! single batch loop that writes each record's result through a `RecordSink`.

mod annotator;
mod manager;
pub mod nuclide;
pub mod reaction;
pub mod resolver;
pub mod rules;
mod sink;
pub mod source;
mod summary;
mod types;

pub use annotator::KeywordAnnotator;
pub use manager::AnnotationManager;
pub use nuclide::{extract_nuclides, extract_nuclides_with};
pub use reaction::extract_reactions;
pub use resolver::{resolve, resolve_all};
pub use rules::{default_rules, Candidate, NuclideRule, RegexRule};
pub use sink::{JsonlSink, MemorySink, RecordSink, SinkError};
pub use source::{read_jsonl, read_jsonl_file, read_jsonl_stdin, LoadedRecords};
pub use summary::CorpusSummary;
pub use types::{AnnotationError, AnnotationEvent, AnnotationResult, BatchAnnotationResult};
