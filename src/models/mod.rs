//! Data models for nsrtag.

mod range;
mod record;

pub use range::{ElementRange, RangeError, PRESETS};
pub use record::{KeywordRecord, RecordUpdate};
