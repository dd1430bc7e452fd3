use async_trait::async_trait;

use crate::api::LookupError;
use crate::types::{RemoteEntity, SearchCandidate};

/// The beer database as seen by the resolver.
///
/// `Ok(None)` means the service answered but had nothing for the query.
/// Transport and service failures are reported as [`LookupError`].
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Search for a beer by name and return the best candidate, if any.
    async fn search_by_name(&self, name: &str) -> Result<Option<SearchCandidate>, LookupError>;

    /// Fetch the full beer document behind a relative or absolute URL.
    async fn fetch_by_url(&self, url: &str) -> Result<Option<RemoteEntity>, LookupError>;
}
