//! REST client for the RateBeer beer endpoints.
//!
//! Wraps name search and beer document retrieval using [`reqwest`].
//! Each call is a single attempt; retries are left to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::lookup::LookupClient;
use crate::types::{RemoteEntity, SearchCandidate};

/// Default service root.
///
/// www.ratebeer.com answers with HTML pages, not the JSON this client
/// reads, so real runs point `base_url` at a JSON-speaking service.
/// Relative beer URLs (`/beer/...`) are root-relative: joining them drops
/// any path on the base URL, so such a service must be mounted at its
/// host root.
pub const DEFAULT_BASE_URL: &str = "https://www.ratebeer.com";

/// Default timeout for a single HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Path of the search endpoint, relative to the base URL.
const SEARCH_PATH: &str = "search";

/// Query parameter carrying the searched beer name.
const SEARCH_QUERY_PARAM: &str = "beername";

/// Key wrapping the result list in object-shaped search responses.
const SEARCH_RESULTS_KEY: &str = "beers";

/// Errors from the RateBeer REST layer.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// RateBeer returned a non-2xx status code other than 404.
    #[error("RateBeer API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body parsed as JSON but not in a shape we understand.
    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    /// A base or beer URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Settings for [`RateBeerApi`].
#[derive(Debug, Clone)]
pub struct RateBeerConfig {
    /// Service root, e.g. `https://www.ratebeer.com`. Relative beer URLs
    /// are resolved against it.
    pub base_url: String,
    /// Timeout applied to every request.
    pub request_timeout: Duration,
    /// Ask for user ratings along with each fetched beer. On by default.
    pub include_user_ratings: bool,
}

impl Default for RateBeerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            include_user_ratings: true,
        }
    }
}

/// HTTP client for the RateBeer service.
#[derive(Debug)]
pub struct RateBeerApi {
    client: reqwest::Client,
    base_url: Url,
    include_user_ratings: bool,
}

impl RateBeerApi {
    /// Build a client with its own connection pool and timeout.
    pub fn new(config: RateBeerConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("brewscrape/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client, &config.base_url, config.include_user_ratings)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        include_user_ratings: bool,
    ) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url).map_err(|e| LookupError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            base_url,
            include_user_ratings,
        })
    }

    /// Resolve a beer URL: absolute URLs pass through, relative ones are
    /// joined onto the base URL.
    pub fn resolve_url(&self, url: &str) -> Result<Url, LookupError> {
        Url::parse(url)
            .or_else(|_| self.base_url.join(url))
            .map_err(|e| LookupError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`LookupError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LookupError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LookupError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl LookupClient for RateBeerApi {
    async fn search_by_name(&self, name: &str) -> Result<Option<SearchCandidate>, LookupError> {
        let url = self.resolve_url(SEARCH_PATH)?;
        tracing::debug!(%url, name, "Searching RateBeer");

        let response = self
            .client
            .get(url)
            .query(&[(SEARCH_QUERY_PARAM, name)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let body: Value = Self::ensure_success(response).await?.json().await?;
        parse_search_body(body)
    }

    async fn fetch_by_url(&self, url: &str) -> Result<Option<RemoteEntity>, LookupError> {
        let mut target = self.resolve_url(url)?;
        if self.include_user_ratings {
            target
                .query_pairs_mut()
                .append_pair("include_user_ratings", "true");
        }
        tracing::debug!(url = %target, "Fetching RateBeer beer");

        let response = self
            .client
            .get(target)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: Value = Self::ensure_success(response).await?.json().await?;
        parse_entity_body(body)
    }
}

/// Pick the first candidate out of a search response.
///
/// Accepts a bare array of results, an object wrapping the array under
/// `beers`, or a single result object. `null` and empty results mean no
/// match.
pub fn parse_search_body(body: Value) -> Result<Option<SearchCandidate>, LookupError> {
    let first = match body {
        Value::Null => return Ok(None),
        Value::Array(results) => results.into_iter().next(),
        Value::Object(mut obj) => match obj.remove(SEARCH_RESULTS_KEY) {
            Some(Value::Array(results)) => results.into_iter().next(),
            Some(Value::Null) => None,
            Some(other) => {
                return Err(LookupError::UnexpectedBody(format!(
                    "'{SEARCH_RESULTS_KEY}' is not an array: {other}"
                )))
            }
            None if obj.is_empty() => None,
            None => Some(Value::Object(obj)),
        },
        other => {
            return Err(LookupError::UnexpectedBody(format!(
                "search returned {other}"
            )))
        }
    };

    match first {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(document)) => Ok(Some(SearchCandidate::from_document(document))),
        Some(other) => Err(LookupError::UnexpectedBody(format!(
            "search result is not an object: {other}"
        ))),
    }
}

/// Interpret a beer fetch response. `null` means the beer is unknown.
pub fn parse_entity_body(body: Value) -> Result<Option<RemoteEntity>, LookupError> {
    match body {
        Value::Null => Ok(None),
        Value::Object(entity) => Ok(Some(entity)),
        other => Err(LookupError::UnexpectedBody(format!(
            "beer document is not an object: {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
