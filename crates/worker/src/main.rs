//! `brewscrape` -- RateBeer enrichment for a beer list.
//!
//! Reads a UTF-16LE, tab-separated beer export, resolves each beer
//! against RateBeer, and writes one `<id>.json` per beer. See
//! [`Config`](brewscrape_worker::config::Config) for flags and
//! environment variables. A `.env` file in the working directory is
//! loaded first.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brewscrape_worker::app;
use brewscrape_worker::config::Config;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "brewscrape_worker=info,brewscrape_pipeline=info,brewscrape_ratebeer=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    if let Err(e) = app::run(config).await {
        tracing::error!(error = %format!("{e:#}"), "Scrape aborted");
        std::process::exit(1);
    }
}
