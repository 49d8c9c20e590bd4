//! Batch orchestration of keyword records.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use crate::config::BatchConfig;
use crate::models::{ElementRange, KeywordRecord, RecordUpdate};

use super::annotator::KeywordAnnotator;
use super::sink::{RecordSink, SinkError};
use super::summary::CorpusSummary;
use super::types::{AnnotationEvent, AnnotationResult, BatchAnnotationResult};

/// Outcome of one record, reported back to the batch loop.
enum RecordOutcome {
    Written {
        record_id: String,
        annotation: AnnotationResult,
    },
    Skipped,
    Failed,
}

/// How failed sink writes are retried.
#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    retries: u32,
    delay: Duration,
}

/// Orchestrates batch annotation over a set of records.
///
/// Records are processed in chunks of `batch_size`; within a chunk at most
/// `concurrency` records are in flight. The sink is flushed after each chunk,
/// and a written record only counts as completed once that flush succeeds.
pub struct AnnotationManager {
    annotator: Arc<KeywordAnnotator>,
    config: BatchConfig,
    range: Option<ElementRange>,
}

impl AnnotationManager {
    pub fn new(annotator: Arc<KeywordAnnotator>, config: BatchConfig) -> Self {
        Self {
            annotator,
            config,
            range: None,
        }
    }

    /// Only write records whose atomic numbers fall in `range`.
    pub fn with_range(mut self, range: Option<ElementRange>) -> Self {
        self.range = range;
        self
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.config.write_retries,
            delay: Duration::from_millis(self.config.retry_delay_ms),
        }
    }

    /// Run a batch of annotations, emitting events for progress tracking.
    ///
    /// The caller owns the event receiver and decides how to present progress
    /// (progress bars, log lines, etc.). This keeps the manager free of UI concerns.
    pub async fn run_batch(
        &self,
        records: Vec<KeywordRecord>,
        sink: Arc<dyn RecordSink>,
        event_tx: mpsc::Sender<AnnotationEvent>,
    ) -> anyhow::Result<BatchAnnotationResult> {
        let total = records.len();
        let _ = event_tx
            .send(AnnotationEvent::Started {
                total_records: total,
            })
            .await;

        let batch_size = self.config.batch_size.max(1);
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let retry = self.retry_policy();

        let mut result = BatchAnnotationResult::default();
        let mut summary = CorpusSummary::new();
        let mut records = records.into_iter();

        loop {
            let chunk: Vec<KeywordRecord> = records.by_ref().take(batch_size).collect();
            if chunk.is_empty() {
                break;
            }

            let mut tasks = JoinSet::new();
            for record in chunk {
                let permit = semaphore.clone().acquire_owned().await?;
                let annotator = self.annotator.clone();
                let sink = sink.clone();
                let event_tx = event_tx.clone();
                let range = self.range;

                tasks.spawn(async move {
                    let _permit = permit;
                    process_record(&annotator, record, sink.as_ref(), range, retry, &event_tx)
                        .await
                });
            }

            let mut written = Vec::new();
            let mut chunk_summary = CorpusSummary::new();
            while let Some(joined) = tasks.join_next().await {
                match joined? {
                    RecordOutcome::Written {
                        record_id,
                        annotation,
                    } => {
                        chunk_summary.record(&annotation);
                        written.push(record_id);
                    }
                    RecordOutcome::Skipped => result.skipped += 1,
                    RecordOutcome::Failed => result.failed += 1,
                }
            }

            match flush_with_retry(sink.as_ref(), retry).await {
                Ok(()) => {
                    result.succeeded += written.len();
                    summary.merge(chunk_summary);
                    for record_id in written {
                        let _ = event_tx
                            .send(AnnotationEvent::RecordCompleted { record_id })
                            .await;
                    }
                }
                Err(e) => {
                    tracing::warn!("flush failed, {} records not persisted: {}", written.len(), e);
                    result.failed += written.len();
                    for record_id in written {
                        let _ = event_tx
                            .send(AnnotationEvent::RecordFailed {
                                record_id,
                                error: e.to_string(),
                            })
                            .await;
                    }
                }
            }
            tracing::info!("processed {} of {} records", result.total(), total);
        }

        let _ = event_tx
            .send(AnnotationEvent::Complete {
                succeeded: result.succeeded,
                failed: result.failed,
                skipped: result.skipped,
            })
            .await;

        result.summary = summary;
        Ok(result)
    }

    /// Annotate and write a single record without events.
    pub async fn process_single(
        &self,
        record: KeywordRecord,
        sink: &dyn RecordSink,
    ) -> anyhow::Result<AnnotationResult> {
        let annotation = self.annotator.annotate(record.keywords.as_deref());
        let update = RecordUpdate::from_result(record.id, annotation.clone());
        let retry = self.retry_policy();
        write_with_retry(sink, &update, retry).await?;
        flush_with_retry(sink, retry).await?;
        Ok(annotation)
    }
}

async fn process_record(
    annotator: &KeywordAnnotator,
    record: KeywordRecord,
    sink: &dyn RecordSink,
    range: Option<ElementRange>,
    retry: RetryPolicy,
    event_tx: &mpsc::Sender<AnnotationEvent>,
) -> RecordOutcome {
    let record_id = record.display_id();
    let annotation = annotator.annotate(record.keywords.as_deref());

    if let Some(range) = range {
        if !range.intersects(&annotation.atomic_numbers) {
            let _ = event_tx
                .send(AnnotationEvent::RecordSkipped { record_id })
                .await;
            return RecordOutcome::Skipped;
        }
    }

    let update = RecordUpdate::from_result(record.id, annotation.clone());
    match write_with_retry(sink, &update, retry).await {
        Ok(()) => RecordOutcome::Written {
            record_id,
            annotation,
        },
        Err(e) => {
            tracing::warn!("write failed for record {}: {}", record_id, e);
            let _ = event_tx
                .send(AnnotationEvent::RecordFailed {
                    record_id,
                    error: e.to_string(),
                })
                .await;
            RecordOutcome::Failed
        }
    }
}

async fn write_with_retry(
    sink: &dyn RecordSink,
    update: &RecordUpdate,
    policy: RetryPolicy,
) -> Result<(), SinkError> {
    let mut attempt = 0;
    loop {
        match sink.write(update).await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_retriable() && attempt < policy.retries => {
                attempt += 1;
                tracing::debug!(
                    "retrying write for record {} ({}/{}): {}",
                    update.display_id(),
                    attempt,
                    policy.retries,
                    e
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn flush_with_retry(sink: &dyn RecordSink, policy: RetryPolicy) -> Result<(), SinkError> {
    let mut attempt = 0;
    loop {
        match sink.flush().await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_retriable() && attempt < policy.retries => {
                attempt += 1;
                tracing::debug!("retrying flush ({}/{}): {}", attempt, policy.retries, e);
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
