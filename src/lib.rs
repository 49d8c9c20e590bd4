//! nsrtag - nuclide and reaction annotation for NSR keyword strings.
//!
//! Extracts normalized nuclide identifiers (`16O`, `208Pb`), verbatim
//! reaction notations (`(n,gamma)`), and the atomic numbers they imply from
//! free-form bibliographic keyword text.

use std::sync::LazyLock;

pub mod config;
pub mod elements;
pub mod models;
pub mod services;

pub use services::annotation::{AnnotationResult, KeywordAnnotator};

static DEFAULT_ANNOTATOR: LazyLock<KeywordAnnotator> = LazyLock::new(KeywordAnnotator::new);

/// Annotate one keyword string with the default rules.
pub fn annotate(text: Option<&str>) -> AnnotationResult {
    DEFAULT_ANNOTATOR.annotate(text)
}
