//! One scrape run: read the beer list, resolve every beer, write results.

use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use brewscrape_core::records::parse_records;
use brewscrape_core::InputRecord;
use brewscrape_pipeline::{ArtifactWriter, PoolSummary, Resolver, WorkerPool};
use brewscrape_ratebeer::RateBeerApi;

use crate::config::Config;

/// Run the scraper to completion.
///
/// Only startup problems are fatal: an unreadable input file, an output
/// directory that cannot be created, or an invalid RateBeer URL.
/// Individual beers that fail are logged and counted in the summary.
pub async fn run(config: Config) -> anyhow::Result<PoolSummary> {
    tracing::info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        data_range = ?config.data_range.map(|r| r.to_string()),
        concurrency = config.queue_concurrency,
        "Starting brewscrape",
    );

    let records = read_records(&config).await?;

    let api = RateBeerApi::new(config.ratebeer()).context("Failed to set up RateBeer client")?;

    let writer = ArtifactWriter::new(&config.output_path);
    writer
        .ensure_dir()
        .await
        .context("Failed to prepare output directory")?;

    let pool = WorkerPool::new(Resolver::new(api), writer, config.queue_concurrency);

    tracing::info!(total = records.len(), "start processing");

    let summary = pool
        .run(records, |summary| {
            tracing::info!(
                total = summary.total,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "done",
            );
        })
        .await;

    Ok(summary)
}

/// Parse the input file on a blocking thread.
async fn read_records(config: &Config) -> anyhow::Result<Vec<InputRecord>> {
    let path = config.input_path.clone();
    let range = config.data_range;

    tokio::task::spawn_blocking(move || {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        parse_records(BufReader::new(file), range)
            .with_context(|| format!("Failed to read input file {}", path.display()))
    })
    .await
    .context("Input reader task panicked")?
}
