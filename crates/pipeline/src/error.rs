use std::path::PathBuf;

use brewscrape_core::BeerId;
use brewscrape_ratebeer::LookupError;

/// Why a record could not be matched to a RateBeer beer.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Every search variant came back empty.
    #[error("No data for {name} ({id})")]
    NoMatch { id: BeerId, name: String },

    /// No variant matched and at least one search failed outright.
    #[error("Error while fetching data for {name} ({id}): {source}")]
    Lookup {
        id: BeerId,
        name: String,
        #[source]
        source: LookupError,
    },

    /// A search matched but its beer page does not exist.
    #[error("Matched beer {url} is missing for {name} ({id})")]
    EntityMissing { id: BeerId, name: String, url: String },

    /// A search matched but its beer page could not be fetched.
    #[error("Failed to fetch {url} for {name} ({id}): {source}")]
    Fetch {
        id: BeerId,
        name: String,
        url: String,
        #[source]
        source: LookupError,
    },
}

/// Failure to persist a resolved beer.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Failed to serialize beer {id}: {source}")]
    Serialize {
        id: BeerId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Terminal error for one record at the worker boundary.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Write(#[from] ArtifactError),
}
