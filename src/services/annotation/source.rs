//! Reading keyword records from JSON Lines input.

use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::models::KeywordRecord;

/// Records parsed from one input, plus the lines that could not be parsed.
#[derive(Debug, Default)]
pub struct LoadedRecords {
    pub records: Vec<KeywordRecord>,
    /// `(line number, parse error)` for each malformed line, 1-based.
    pub malformed: Vec<(usize, String)>,
}

/// Read one `{"id": ..., "keywords": ...}` object per line.
///
/// Blank lines are ignored. Malformed lines are logged and collected rather
/// than aborting the read.
pub async fn read_jsonl<R: AsyncBufRead + Unpin>(reader: R) -> std::io::Result<LoadedRecords> {
    let mut loaded = LoadedRecords::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<KeywordRecord>(trimmed) {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                tracing::warn!("skipping malformed record on line {}: {}", line_no, e);
                loaded.malformed.push((line_no, e.to_string()));
            }
        }
    }

    Ok(loaded)
}

/// Read records from a JSONL file.
pub async fn read_jsonl_file(path: &Path) -> std::io::Result<LoadedRecords> {
    let file = tokio::fs::File::open(path).await?;
    read_jsonl(BufReader::new(file)).await
}

/// Read records from stdin.
pub async fn read_jsonl_stdin() -> std::io::Result<LoadedRecords> {
    read_jsonl(BufReader::new(tokio::io::stdin())).await
}
