//! Shared test support: a scripted in-memory [`LookupClient`].

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use brewscrape_core::{BeerId, InputRecord};
use brewscrape_ratebeer::{LookupClient, LookupError, RemoteEntity, SearchCandidate};
use serde_json::Value;

/// Scripted answer for one lookup.
#[derive(Debug, Clone)]
pub enum Reply {
    Hit(Value),
    Miss,
    Fail,
}

/// A call observed by [`FakeLookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch(String),
    Search(String),
}

/// In-memory beer database.
///
/// Direct fetches (`/beer/<token>/<id>/`) are answered from `direct` by id,
/// other fetches from `pages` by exact URL, searches from `searches` by
/// exact text. Anything unscripted is a miss.
#[derive(Default)]
pub struct FakeLookup {
    direct: HashMap<BeerId, Reply>,
    pages: HashMap<String, Reply>,
    searches: HashMap<String, Reply>,
    delay: Option<Duration>,
    calls: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direct(mut self, id: BeerId, reply: Reply) -> Self {
        self.direct.insert(id, reply);
        self
    }

    pub fn page(mut self, url: &str, reply: Reply) -> Self {
        self.pages.insert(url.to_string(), reply);
        self
    }

    pub fn search(mut self, text: &str, reply: Reply) -> Self {
        self.searches.insert(text.to_string(), reply);
        self
    }

    /// Sleep this long inside every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn searches_made(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Search(text) => Some(text),
                Call::Fetch(_) => None,
            })
            .collect()
    }

    pub fn fetches_made(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Fetch(url) => Some(url),
                Call::Search(_) => None,
            })
            .collect()
    }

    /// Highest number of calls observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn direct_reply(&self, url: &str) -> Option<&Reply> {
        let segments: Vec<&str> = url.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["beer", token, id] if token.len() == 8 => {
                let id: BeerId = id.parse().ok()?;
                self.direct.get(&id)
            }
            _ => None,
        }
    }
}

fn service_down() -> LookupError {
    LookupError::Api {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

fn as_object(value: &Value) -> RemoteEntity {
    value.as_object().cloned().expect("scripted replies are objects")
}

#[async_trait]
impl LookupClient for FakeLookup {
    async fn search_by_name(&self, name: &str) -> Result<Option<SearchCandidate>, LookupError> {
        self.enter(Call::Search(name.to_string())).await;
        match self.searches.get(name) {
            Some(Reply::Hit(value)) => Ok(Some(SearchCandidate::from_document(as_object(value)))),
            Some(Reply::Fail) => Err(service_down()),
            Some(Reply::Miss) | None => Ok(None),
        }
    }

    async fn fetch_by_url(&self, url: &str) -> Result<Option<RemoteEntity>, LookupError> {
        self.enter(Call::Fetch(url.to_string())).await;
        let reply = self.pages.get(url).or_else(|| self.direct_reply(url));
        match reply {
            Some(Reply::Hit(value)) => Ok(Some(as_object(value))),
            Some(Reply::Fail) => Err(service_down()),
            Some(Reply::Miss) | None => Ok(None),
        }
    }
}

pub fn record(id: BeerId, name: &str) -> InputRecord {
    InputRecord {
        id,
        name: name.to_string(),
        raw_fields: vec![id.to_string(), name.to_string()],
    }
}
