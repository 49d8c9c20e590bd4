//! Service layer for nsrtag.
//!
//! Domain logic separated from UI concerns, usable by the CLI or by any
//! caller that owns the record store.

pub mod annotation;

pub use annotation::{
    AnnotationError, AnnotationEvent, AnnotationManager, AnnotationResult, BatchAnnotationResult,
    KeywordAnnotator,
};
