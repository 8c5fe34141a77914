use crate::model::{Artist, ArtistRef, Track};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog request to {url} returned HTTP {status}")]
    Status { status: u16, url: String },
    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("Request to {url} timed out")]
    Timeout { url: String },
    #[error("Transport error calling {url}: {reason}")]
    Transport { url: String, reason: String },
}

impl CatalogError {
    /// Whether a discovery loop may skip the failed item and carry on.
    ///
    /// Non-2xx statuses, malformed bodies and timed-out requests are per-item
    /// failures. A transport failure means the service is unreachable and
    /// aborts the run.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Decode { .. } | Self::Timeout { .. }
        )
    }
}

/// Read-only view of the remote catalog used by the discovery strategies.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Genre labels from the plain enumeration endpoint.
    async fn available_genre_seeds(&self) -> Result<Vec<String>, CatalogError>;

    /// Track search; `query` is passed through verbatim (e.g. `genre:jazz`).
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError>;

    /// Artist search; `query` is passed through verbatim.
    async fn search_artists(&self, query: &str, limit: u32)
        -> Result<Vec<ArtistRef>, CatalogError>;

    /// Artist details including declared genres.
    async fn artist(&self, id: &str) -> Result<Artist, CatalogError>;

    /// Artists the catalog considers related to `id`.
    async fn related_artists(&self, id: &str) -> Result<Vec<ArtistRef>, CatalogError>;
}

/// Builds the field-filtered search query for a genre keyword.
pub fn genre_query(keyword: &str) -> String {
    format!("genre:{keyword}")
}
