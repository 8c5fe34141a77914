//! In-memory catalog used by the strategy and pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{Artist, ArtistRef, Track};
use crate::traits::{CatalogError, CatalogSource};

#[derive(Default)]
pub(crate) struct MockCatalog {
    genre_seeds: Vec<String>,
    fail_genre_seeds: bool,
    artists: HashMap<String, Vec<String>>,
    related: HashMap<String, Vec<String>>,
    /// search query -> artist ids (one track per id for track search)
    searches: HashMap<String, Vec<String>>,
    failing_queries: HashSet<String>,
    failing_artists: HashSet<String>,
    failing_related: HashSet<String>,
    unreachable: bool,
    calls: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_genre_seeds(mut self, genres: &[&str]) -> Self {
        self.genre_seeds = genres.iter().map(|s| s.to_string()).collect();
        self
    }

    pub(crate) fn failing_genre_seeds(mut self) -> Self {
        self.fail_genre_seeds = true;
        self
    }

    pub(crate) fn with_artist(mut self, id: &str, genres: &[&str], related: &[&str]) -> Self {
        self.artists
            .insert(id.to_string(), genres.iter().map(|s| s.to_string()).collect());
        self.related
            .insert(id.to_string(), related.iter().map(|s| s.to_string()).collect());
        self
    }

    pub(crate) fn with_search(mut self, query: &str, artist_ids: &[&str]) -> Self {
        self.searches.insert(
            query.to_string(),
            artist_ids.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub(crate) fn failing_query(mut self, query: &str) -> Self {
        self.failing_queries.insert(query.to_string());
        self
    }

    pub(crate) fn failing_artist(mut self, id: &str) -> Self {
        self.failing_artists.insert(id.to_string());
        self
    }

    pub(crate) fn failing_related(mut self, id: &str) -> Self {
        self.failing_related.insert(id.to_string());
        self
    }

    /// Every call fails with a transport error.
    pub(crate) fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Number of artist-detail fetches for `id`.
    pub(crate) fn artist_fetches(&self, id: &str) -> usize {
        let wanted = format!("artist:{id}");
        self.calls().iter().filter(|c| **c == wanted).count()
    }

    /// Total number of artist-detail fetches.
    pub(crate) fn total_artist_fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with("artist:"))
            .count()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) -> Result<(), CatalogError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.clone());
        }
        if self.unreachable {
            return Err(CatalogError::Transport {
                url: call,
                reason: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(url: String) -> CatalogError {
        CatalogError::Status { status: 404, url }
    }

    fn search(&self, query: &str) -> Result<Vec<String>, CatalogError> {
        self.record(format!("search:{query}"))?;
        if self.failing_queries.contains(query) {
            return Err(CatalogError::Status {
                status: 500,
                url: format!("search:{query}"),
            });
        }
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }
}

/// Id used in fixtures for an artist reference whose id is null.
pub(crate) const NULL_ID: &str = "<null>";

fn artist_ref(id: &str) -> ArtistRef {
    ArtistRef {
        id: (id != NULL_ID).then(|| id.to_string()),
        name: format!("Artist {id}"),
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn available_genre_seeds(&self) -> Result<Vec<String>, CatalogError> {
        self.record("genre-seeds".to_string())?;
        if self.fail_genre_seeds {
            return Err(Self::not_found("genre-seeds".to_string()));
        }
        Ok(self.genre_seeds.clone())
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError> {
        let ids = self.search(query)?;
        Ok(ids
            .iter()
            .take(limit as usize)
            .enumerate()
            .map(|(n, id)| Track {
                id: Some(format!("track-{n}")),
                name: format!("Track {n}"),
                // An empty id stands for a track without artists.
                artists: if id.is_empty() {
                    Vec::new()
                } else {
                    vec![artist_ref(id)]
                },
            })
            .collect())
    }

    async fn search_artists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ArtistRef>, CatalogError> {
        let ids = self.search(query)?;
        Ok(ids.iter().take(limit as usize).map(|id| artist_ref(id)).collect())
    }

    async fn artist(&self, id: &str) -> Result<Artist, CatalogError> {
        self.record(format!("artist:{id}"))?;
        if self.failing_artists.contains(id) {
            return Err(Self::not_found(format!("artist:{id}")));
        }
        let genres = self
            .artists
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("artist:{id}")))?;
        Ok(Artist {
            id: id.to_string(),
            name: format!("Artist {id}"),
            genres,
        })
    }

    async fn related_artists(&self, id: &str) -> Result<Vec<ArtistRef>, CatalogError> {
        self.record(format!("related:{id}"))?;
        if self.failing_related.contains(id) {
            return Err(Self::not_found(format!("related:{id}")));
        }
        let related = self
            .related
            .get(id)
            .ok_or_else(|| Self::not_found(format!("related:{id}")))?;
        Ok(related.iter().map(|r| artist_ref(r)).collect())
    }
}
