//! Per-beer JSON output files.
//!
//! Every resolved beer lands in `<dir>/<id>.json`, keyed by the local id.
//! Rewriting a beer replaces its file.

use std::path::PathBuf;

use brewscrape_core::BeerId;
use brewscrape_ratebeer::RemoteEntity;

use crate::error::ArtifactError;

/// Writes resolved beers into an output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Deterministic file path for a beer.
    pub fn path_for(&self, id: BeerId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Create the output directory and any missing parents.
    pub async fn ensure_dir(&self) -> Result<(), ArtifactError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ArtifactError::Io {
                path: self.dir.clone(),
                source,
            })
    }

    /// Serialize `entity` as pretty JSON and write it to [`Self::path_for`].
    pub async fn write(&self, id: BeerId, entity: &RemoteEntity) -> Result<PathBuf, ArtifactError> {
        let path = self.path_for(id);
        let json = serde_json::to_vec_pretty(entity)
            .map_err(|source| ArtifactError::Serialize { id, source })?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|source| ArtifactError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(beer_id = id, path = %path.display(), "Artifact written");
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
