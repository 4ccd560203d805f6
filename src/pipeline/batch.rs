// Batch pipeline: score many profiles from one JSON file.
//
// Records are validated up front (bad entries are logged and skipped), then
// analyzed concurrently on tokio's blocking pool. Results come back in input
// order, so report row N always matches input entry N among the valid ones.
// History writes happen afterwards, one at a time, on the caller's store.

use std::path::Path;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::history::{EntrySource, HistoryStore};
use crate::profile::{ProfileInput, ProfileRecord};
use crate::scoring::{ScoringEngine, ScoringReport};

/// One analyzed profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub record: ProfileRecord,
    pub report: ScoringReport,
}

/// Read a JSON array of raw profile inputs.
pub fn load_inputs(path: &Path) -> Result<Vec<ProfileInput>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;
    let inputs: Vec<ProfileInput> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON array of profiles", path.display()))?;
    Ok(inputs)
}

/// Validate every input, keeping the good ones in order.
/// Returns the valid records and how many entries were skipped.
pub fn validate_inputs(inputs: Vec<ProfileInput>) -> (Vec<ProfileRecord>, usize) {
    let mut records = Vec::with_capacity(inputs.len());
    let mut skipped = 0;
    for (index, input) in inputs.into_iter().enumerate() {
        match input.validate() {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping invalid batch entry");
                skipped += 1;
            }
        }
    }
    (records, skipped)
}

/// Analyze `records` with up to `concurrency` in flight at once.
///
/// When `history` is given, each analyzed record is saved with
/// `EntrySource::Batch`. A failed save is logged, not fatal.
pub async fn run(
    engine: &ScoringEngine,
    records: Vec<ProfileRecord>,
    history: Option<&dyn HistoryStore>,
    concurrency: usize,
    show_progress: bool,
) -> Result<Vec<BatchResult>> {
    let pb = if show_progress {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar().template("  Analyzing [{bar:30}] {pos}/{len} ({eta})")?,
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<Result<BatchResult>> = stream::iter(records.into_iter().map(|record| {
        let engine = engine.clone();
        async move {
            let (record, report) = tokio::task::spawn_blocking(move || {
                let report = engine.analyze(&record);
                (record, report)
            })
            .await
            .context("Scoring task panicked")?;
            Ok::<_, anyhow::Error>(BatchResult { record, report })
        }
    }))
    .buffered(concurrency.max(1))
    .inspect(|_| pb.inc(1))
    .collect()
    .await;
    pb.finish_and_clear();

    let results = results.into_iter().collect::<Result<Vec<_>>>()?;

    if let Some(store) = history {
        let mut saved = 0;
        for result in &results {
            match store.save(&result.record, EntrySource::Batch).await {
                Ok(_) => saved += 1,
                Err(e) => {
                    warn!(username = %result.record.username, error = %e, "Failed to save batch entry")
                }
            }
        }
        info!(saved, "Batch results saved to history");
    }

    info!(analyzed = results.len(), "Batch complete");
    Ok(results)
}
