//! Record → RateBeer beer resolution.
//!
//! A record is first fetched directly by id. If that misses or fails,
//! the name variants are searched one after another until one matches,
//! and the matched beer page is fetched. The first match wins.

use brewscrape_core::naming;
use brewscrape_core::{BeerId, InputRecord};
use brewscrape_ratebeer::types::ID_FIELD;
use brewscrape_ratebeer::{urls, LookupClient, RemoteEntity, SearchCandidate};
use serde_json::Value;

use crate::error::ResolveError;

/// Key under which a diverging RateBeer id is preserved.
pub const REF_ID_FIELD: &str = "refId";

/// How a beer was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Fetched by id without searching.
    Direct { url: String },
    /// Found by searching for `variant`.
    Search { variant: String, url: Option<String> },
}

/// A resolved beer, ready to be written.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub entity: RemoteEntity,
    pub source: ResolutionSource,
}

/// Resolves records against a [`LookupClient`].
pub struct Resolver<C> {
    client: C,
}

impl<C: LookupClient> Resolver<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolve one record to its RateBeer beer.
    ///
    /// Issues a single direct fetch, then falls back to searching the
    /// name variants in order. The returned entity's `id` is always the
    /// record's id; see [`reconcile_id`].
    pub async fn resolve(&self, record: &InputRecord) -> Result<Resolution, ResolveError> {
        let direct_url = urls::direct_beer_path(record.id);

        match self.client.fetch_by_url(&direct_url).await {
            Ok(Some(mut entity)) => {
                reconcile_id(&mut entity, record.id);
                tracing::debug!(beer_id = record.id, url = %direct_url, "Direct fetch matched");
                return Ok(Resolution {
                    entity,
                    source: ResolutionSource::Direct { url: direct_url },
                });
            }
            Ok(None) => {
                tracing::debug!(beer_id = record.id, url = %direct_url, "Direct fetch missed");
            }
            Err(e) => {
                tracing::warn!(
                    beer_id = record.id,
                    url = %direct_url,
                    error = %e,
                    "Direct fetch failed, falling back to search",
                );
            }
        }

        let (variant, candidate) = self.search(record).await?;
        let url = candidate.url.clone();

        let mut entity = match &candidate.url {
            Some(url) => self.fetch_candidate(record, url).await?,
            None => candidate.document,
        };

        if let Some(remote_id) = reconcile_id(&mut entity, record.id) {
            tracing::info!(
                beer_id = record.id,
                remote_id = %remote_id,
                "RateBeer id differs from local id",
            );
        }

        Ok(Resolution {
            entity,
            source: ResolutionSource::Search { variant, url },
        })
    }

    /// Search the name variants strictly in order and return the first hit.
    async fn search(
        &self,
        record: &InputRecord,
    ) -> Result<(String, SearchCandidate), ResolveError> {
        let mut last_error = None;

        for variant in naming::variants(&record.name) {
            if variant.is_empty() {
                continue;
            }

            match self.client.search_by_name(&variant).await {
                Ok(Some(candidate)) => {
                    tracing::debug!(beer_id = record.id, variant = %variant, "Search matched");
                    return Ok((variant, candidate));
                }
                Ok(None) => {
                    tracing::debug!(beer_id = record.id, variant = %variant, "Search missed");
                }
                Err(e) => {
                    tracing::warn!(
                        beer_id = record.id,
                        variant = %variant,
                        error = %e,
                        "Search failed",
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(source) => ResolveError::Lookup {
                id: record.id,
                name: record.name.clone(),
                source,
            },
            None => ResolveError::NoMatch {
                id: record.id,
                name: record.name.clone(),
            },
        })
    }

    async fn fetch_candidate(
        &self,
        record: &InputRecord,
        url: &str,
    ) -> Result<RemoteEntity, ResolveError> {
        match self.client.fetch_by_url(url).await {
            Ok(Some(entity)) => Ok(entity),
            Ok(None) => Err(ResolveError::EntityMissing {
                id: record.id,
                name: record.name.clone(),
                url: url.to_string(),
            }),
            Err(source) => Err(ResolveError::Fetch {
                id: record.id,
                name: record.name.clone(),
                url: url.to_string(),
                source,
            }),
        }
    }
}

/// Key the entity by the local id.
///
/// Sets `id` to `local_id`. When the entity carried a different id, that
/// value moves to [`REF_ID_FIELD`] and is returned. Numeric strings
/// compare equal to the matching number.
pub fn reconcile_id(entity: &mut RemoteEntity, local_id: BeerId) -> Option<Value> {
    let previous = entity.insert(ID_FIELD.to_string(), Value::from(local_id));

    match previous {
        Some(remote) if !remote.is_null() && !same_id(&remote, local_id) => {
            entity.insert(REF_ID_FIELD.to_string(), remote.clone());
            Some(remote)
        }
        _ => None,
    }
}

fn same_id(remote: &Value, local_id: BeerId) -> bool {
    match remote {
        Value::Number(n) => n.as_i64() == Some(local_id),
        Value::String(s) => s.trim().parse::<BeerId>().ok() == Some(local_id),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
