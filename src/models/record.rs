//! Keyword records in and annotation updates out.

use serde::{Deserialize, Serialize};

use crate::elements::AtomicNumber;
use crate::services::annotation::AnnotationResult;

/// One bibliographic record as supplied by the caller.
///
/// `id` is any JSON scalar the caller uses as a key; it is echoed back
/// unchanged. Missing or null keywords are annotated as empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub id: serde_json::Value,
    #[serde(default)]
    pub keywords: Option<String>,
}

impl KeywordRecord {
    pub fn new(id: impl Into<serde_json::Value>, keywords: Option<&str>) -> Self {
        Self {
            id: id.into(),
            keywords: keywords.map(str::to_string),
        }
    }

    /// Display form of the key for logs and progress output.
    pub fn display_id(&self) -> String {
        display_id(&self.id)
    }
}

/// The three derived fields for one record, keyed by its id.
///
/// Empty collections serialize as `null` so the store can tell "nothing
/// recognized" apart from an empty array written by something else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub id: serde_json::Value,
    pub nuclides: Option<Vec<String>>,
    pub reactions: Option<Vec<String>>,
    pub z_values: Option<Vec<AtomicNumber>>,
}

impl RecordUpdate {
    pub fn from_result(id: serde_json::Value, result: AnnotationResult) -> Self {
        Self {
            id,
            nuclides: non_empty(result.nuclides),
            reactions: non_empty(result.reactions),
            z_values: non_empty(result.atomic_numbers),
        }
    }

    pub fn display_id(&self) -> String {
        display_id(&self.id)
    }
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn display_id(id: &serde_json::Value) -> String {
    match id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_without_keywords() {
        let record: KeywordRecord = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(record.id, json!(7));
        assert_eq!(record.keywords, None);

        let record: KeywordRecord =
            serde_json::from_str(r#"{"id": "A1", "keywords": null, "year": 1999}"#).unwrap();
        assert_eq!(record.display_id(), "A1");
        assert_eq!(record.keywords, None);
    }

    #[test]
    fn test_empty_result_writes_nulls() {
        let update = RecordUpdate::from_result(json!(1), AnnotationResult::default());
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "nuclides": null, "reactions": null, "z_values": null})
        );
    }

    #[test]
    fn test_populated_result() {
        let result = AnnotationResult {
            nuclides: vec!["16O".to_string()],
            reactions: vec![],
            atomic_numbers: vec![8],
        };
        let update = RecordUpdate::from_result(json!("1999AB01"), result);
        assert_eq!(update.nuclides, Some(vec!["16O".to_string()]));
        assert_eq!(update.reactions, None);
        assert_eq!(update.z_values, Some(vec![8]));
        assert_eq!(update.display_id(), "1999AB01");
    }
}
