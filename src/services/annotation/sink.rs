//! Record sinks: where annotation updates are written back.
//!
//! The store that owns the records implements `RecordSink`. Each write is
//! independent; the manager retries a failed write on its own without
//! touching other records.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

use crate::models::RecordUpdate;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize update: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Store rejected update: {0}")]
    Rejected(String),
}

impl SinkError {
    /// Whether retrying the same write may succeed.
    pub fn is_retriable(&self) -> bool {
        !matches!(self, SinkError::Serialize(_))
    }
}

/// Destination for annotation updates, keyed by record id.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Write one record's derived fields.
    async fn write(&self, update: &RecordUpdate) -> Result<(), SinkError>;

    /// Flush buffered writes. Called after every chunk.
    async fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes one JSON object per line.
pub struct JsonlSink<W> {
    writer: Mutex<BufWriter<W>>,
}

impl<W: AsyncWrite + Unpin + Send> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
        }
    }
}

impl JsonlSink<tokio::fs::File> {
    /// Create (or truncate) a JSONL file.
    pub async fn create(path: &Path) -> Result<Self, SinkError> {
        let file = tokio::fs::File::create(path).await?;
        Ok(Self::new(file))
    }
}

impl JsonlSink<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> RecordSink for JsonlSink<W> {
    async fn write(&self, update: &RecordUpdate) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(update)?;
        line.push(b'\n');
        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        Ok(())
    }

    async fn flush(&self) -> Result<(), SinkError> {
        self.writer.lock().await.flush().await?;
        Ok(())
    }
}

/// Collects updates in memory.
#[derive(Default)]
pub struct MemorySink {
    updates: Mutex<Vec<RecordUpdate>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the updates written so far, in write order.
    pub async fn updates(&self) -> Vec<RecordUpdate> {
        self.updates.lock().await.clone()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn write(&self, update: &RecordUpdate) -> Result<(), SinkError> {
        self.updates.lock().await.push(update.clone());
        Ok(())
    }
}
