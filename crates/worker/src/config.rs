use std::path::PathBuf;
use std::time::Duration;

use brewscrape_core::DataRange;
use brewscrape_pipeline::DEFAULT_CONCURRENCY;
use brewscrape_ratebeer::api::DEFAULT_BASE_URL;
use brewscrape_ratebeer::RateBeerConfig;
use clap::Parser;

/// Scraper configuration, from flags or environment variables.
///
/// | Flag                     | Env Var                          | Default                    |
/// |--------------------------|----------------------------------|----------------------------|
/// | `--input-path`           | `BREWSCRAPE_INPUT_PATH`          | `./data/beers.txt`         |
/// | `--output-path`          | `BREWSCRAPE_OUTPUT_PATH`         | `./data/scraped`           |
/// | `--data-range`           | `BREWSCRAPE_DATA_RANGE`          | all records                |
/// | `--queue-concurrency`    | `BREWSCRAPE_QUEUE_CONCURRENCY`   | `3`                        |
/// | `--ratebeer-url`         | `RATEBEER_BASE_URL`              | `https://www.ratebeer.com` |
/// | `--request-timeout-secs` | `RATEBEER_TIMEOUT_SECS`          | `30`                       |
/// | `--include-user-ratings` | `RATEBEER_INCLUDE_USER_RATINGS`  | `true`                     |
#[derive(Debug, Clone, Parser)]
#[command(name = "brewscrape")]
#[command(about = "Scrape RateBeer data for a beer list", version)]
pub struct Config {
    /// Path where the beer list is located (UTF-16LE, tab-separated)
    #[arg(long, env = "BREWSCRAPE_INPUT_PATH", default_value = "./data/beers.txt")]
    pub input_path: PathBuf,

    /// Directory where scraped beer JSON files are saved
    #[arg(long, env = "BREWSCRAPE_OUTPUT_PATH", default_value = "./data/scraped")]
    pub output_path: PathBuf,

    /// Range of records that are processed, e.g. "1:500" (1-based, inclusive)
    #[arg(long, env = "BREWSCRAPE_DATA_RANGE")]
    pub data_range: Option<DataRange>,

    /// Number of beers resolved at the same time
    #[arg(
        long,
        env = "BREWSCRAPE_QUEUE_CONCURRENCY",
        default_value_t = DEFAULT_CONCURRENCY,
        value_parser = parse_concurrency
    )]
    pub queue_concurrency: usize,

    /// RateBeer service root
    #[arg(long, env = "RATEBEER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub ratebeer_url: String,

    /// Timeout for a single RateBeer request, in seconds
    #[arg(long, env = "RATEBEER_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Request user ratings along with every fetched beer ("false" to skip them)
    #[arg(
        long,
        env = "RATEBEER_INCLUDE_USER_RATINGS",
        action = clap::ArgAction::Set,
        default_value_t = true
    )]
    pub include_user_ratings: bool,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn ratebeer(&self) -> RateBeerConfig {
        RateBeerConfig {
            base_url: self.ratebeer_url.clone(),
            request_timeout: self.request_timeout(),
            include_user_ratings: self.include_user_ratings,
        }
    }
}

/// Parse a worker count; zero workers would never drain the queue.
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number"))?;
    if n == 0 {
        return Err("queue concurrency must be at least 1".to_string());
    }
    Ok(n)
}
