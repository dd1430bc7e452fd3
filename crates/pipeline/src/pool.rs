//! Fixed-size worker pool over the resolve → write chain.
//!
//! At most `concurrency` records are in flight at once. A slot frees up as
//! soon as its record finishes, successfully or not, and the next queued
//! record takes it. Records start in input order; they finish in any order.

use std::path::PathBuf;

use brewscrape_core::{BeerId, InputRecord};
use brewscrape_ratebeer::LookupClient;
use futures::{stream, StreamExt};

use crate::artifact::ArtifactWriter;
use crate::error::ProcessError;
use crate::resolver::Resolver;

/// Number of records processed at once unless configured otherwise.
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Result of processing one record. Logged, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOutcome {
    pub record_id: BeerId,
    pub name: String,
    /// Written artifact, on success.
    pub artifact: Option<PathBuf>,
    /// Terminal error message, on failure.
    pub error: Option<String>,
}

impl ProcessingOutcome {
    fn new(record: &InputRecord, result: Result<PathBuf, ProcessError>) -> Self {
        let (artifact, error) = match result {
            Ok(path) => (Some(path), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            record_id: record.id,
            name: record.name.clone(),
            artifact,
            error,
        }
    }

    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Outcomes in completion order.
    pub outcomes: Vec<ProcessingOutcome>,
}

/// Progress message for the `index`-th completion out of `total`.
pub fn progress_line(index: usize, total: usize, record: &InputRecord, ok: bool) -> String {
    let status = if ok { "OK" } else { "ERROR" };
    format!(
        "{index}/{total} ({}) {status} processing for {}",
        record.id, record.name
    )
}

/// Drives a [`Resolver`] and an [`ArtifactWriter`] over many records.
pub struct WorkerPool<C> {
    resolver: Resolver<C>,
    writer: ArtifactWriter,
    concurrency: usize,
}

impl<C: LookupClient> WorkerPool<C> {
    /// `concurrency` below 1 is raised to 1.
    pub fn new(resolver: Resolver<C>, writer: ArtifactWriter, concurrency: usize) -> Self {
        Self {
            resolver,
            writer,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn resolver(&self) -> &Resolver<C> {
        &self.resolver
    }

    /// Resolve one record and write its artifact.
    pub async fn process(&self, record: &InputRecord) -> Result<PathBuf, ProcessError> {
        let resolution = self.resolver.resolve(record).await?;
        let path = self.writer.write(record.id, &resolution.entity).await?;
        Ok(path)
    }

    /// Process every record and call `on_drain` once all have finished.
    ///
    /// Per-record failures are logged and counted; they never stop the run.
    /// `on_drain` also fires when `records` is empty.
    pub async fn run<F>(&self, records: Vec<InputRecord>, on_drain: F) -> PoolSummary
    where
        F: FnOnce(&PoolSummary),
    {
        let total = records.len();
        let mut summary = PoolSummary {
            total,
            ..PoolSummary::default()
        };

        let mut completions = stream::iter(records)
            .map(|record| async move {
                let result = self.process(&record).await;
                (record, result)
            })
            .buffer_unordered(self.concurrency);

        let mut index = 0usize;
        while let Some((record, result)) = completions.next().await {
            index += 1;
            match &result {
                Ok(path) => {
                    summary.succeeded += 1;
                    tracing::info!(
                        beer_id = record.id,
                        path = %path.display(),
                        "{}",
                        progress_line(index, total, &record, true),
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!(
                        beer_id = record.id,
                        error = %e,
                        "{}",
                        progress_line(index, total, &record, false),
                    );
                }
            }
            summary.outcomes.push(ProcessingOutcome::new(&record, result));
        }

        on_drain(&summary);
        summary
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
