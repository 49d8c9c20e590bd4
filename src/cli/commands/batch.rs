//! Batch annotation over JSON Lines records.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use nsrtag::config::{expand_path, Config};
use nsrtag::models::ElementRange;
use nsrtag::services::annotation::{
    read_jsonl_file, read_jsonl_stdin, AnnotationEvent, AnnotationManager, CorpusSummary,
    JsonlSink, KeywordAnnotator, RecordSink,
};

use crate::cli::icons::{dim_arrow, error, info, success, warn};

/// Options for a batch run, collected from the command line.
pub struct BatchOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub range: Option<ElementRange>,
    pub concurrency: Option<usize>,
    pub batch_size: Option<usize>,
    pub summary: bool,
    pub top: usize,
}

/// Annotate every record from the input and write one update line per record.
pub async fn cmd_batch(config: &Config, options: BatchOptions) -> anyhow::Result<()> {
    let mut batch_config = config.batch.clone();
    if let Some(n) = options.concurrency.filter(|n| *n > 0) {
        batch_config.concurrency = n;
    }
    if let Some(n) = options.batch_size.filter(|n| *n > 0) {
        batch_config.batch_size = n;
    }

    // Element table problems are fatal before any record is read
    let annotator = Arc::new(KeywordAnnotator::from_config(&config.annotation)?);

    let loaded = match options.input {
        Some(ref path) => {
            let path = expand_path(path);
            read_jsonl_file(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => read_jsonl_stdin().await.context("Failed to read stdin")?,
    };

    let malformed = loaded.malformed.len();
    if malformed > 0 {
        eprintln!(
            "{} Skipping {} malformed input line{}",
            warn(),
            malformed,
            if malformed == 1 { "" } else { "s" }
        );
    }

    if loaded.records.is_empty() {
        eprintln!("{} No records to annotate", warn());
        return batch_outcome(0, malformed);
    }

    let sink: Arc<dyn RecordSink> = match options.output {
        Some(ref path) => {
            let path = expand_path(path);
            Arc::new(
                JsonlSink::create(&path)
                    .await
                    .with_context(|| format!("Failed to create {}", path.display()))?,
            )
        }
        None => Arc::new(JsonlSink::stdout()),
    };

    eprintln!(
        "{} Annotating {} records ({} concurrent, chunks of {})",
        info(),
        loaded.records.len(),
        batch_config.concurrency,
        batch_config.batch_size
    );
    if let Some(range) = options.range {
        eprintln!("  {} Keeping records in {}", dim_arrow(), range.label());
    }

    let manager = AnnotationManager::new(annotator, batch_config).with_range(options.range);

    // Create event channel for progress tracking
    let (event_tx, mut event_rx) = mpsc::channel::<AnnotationEvent>(100);

    // Spawn event handler for UI
    let event_handler = tokio::spawn(async move {
        let mut progress: Option<ProgressBar> = None;
        while let Some(event) = event_rx.recv().await {
            match event {
                AnnotationEvent::Started { total_records } => {
                    let pb = ProgressBar::new(total_records as u64);
                    pb.set_style(
                        ProgressStyle::default_bar()
                            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                            .unwrap_or_else(|_| ProgressStyle::default_bar())
                            .progress_chars("█▓░"),
                    );
                    pb.set_message("Annotating...");
                    progress = Some(pb);
                }
                AnnotationEvent::RecordCompleted { .. } | AnnotationEvent::RecordSkipped { .. } => {
                    if let Some(ref pb) = progress {
                        pb.inc(1);
                    }
                }
                AnnotationEvent::RecordFailed { record_id, error: e } => {
                    if let Some(ref pb) = progress {
                        pb.println(format!("{} {}: {}", error(), record_id, e));
                        pb.inc(1);
                    }
                }
                AnnotationEvent::Complete {
                    succeeded,
                    failed,
                    skipped,
                } => {
                    if let Some(pb) = progress.take() {
                        pb.finish_and_clear();
                    }
                    eprintln!(
                        "{} Annotation complete: {} written, {} skipped, {} failed",
                        success(),
                        succeeded,
                        skipped,
                        failed
                    );
                }
            }
        }
    });

    // Run manager
    let result = manager.run_batch(loaded.records, sink, event_tx).await?;

    // Wait for event handler to finish
    let _ = event_handler.await;

    if options.summary {
        print_summary(&result.summary, options.top);
    }

    batch_outcome(result.failed, malformed)
}

/// A run succeeds only when every record was written and every input line parsed.
fn batch_outcome(failed: usize, malformed: usize) -> anyhow::Result<()> {
    if failed > 0 || malformed > 0 {
        anyhow::bail!(
            "{} records failed to write, {} input lines were malformed",
            failed,
            malformed
        );
    }
    Ok(())
}

fn print_summary(summary: &CorpusSummary, top: usize) {
    eprintln!();
    eprintln!(
        "{} {} records: {} distinct nuclides, {} distinct reactions, {} elements",
        info(),
        summary.records,
        summary.nuclides.len(),
        summary.reactions.len(),
        summary.atomic_numbers.len()
    );

    let nuclides = summary.top_nuclides(top);
    if !nuclides.is_empty() {
        eprintln!("  Top nuclides:");
        for (nuclide, count) in nuclides {
            eprintln!("    {:<10} {}", nuclide, count);
        }
    }

    let reactions = summary.top_reactions(top);
    if !reactions.is_empty() {
        eprintln!("  Top reactions:");
        for (reaction, count) in reactions {
            eprintln!("    {:<16} {}", reaction, count);
        }
    }
}
