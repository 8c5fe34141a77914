//! Keyword expansion: search tracks per genre keyword and collect the genres
//! declared by the artists behind the hits.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::config::HarvestSettings;
use crate::harvest::traits::{pause, DiscoveryStrategy, GenreSet};
use crate::model::Track;
use crate::traits::{genre_query, CatalogError, CatalogSource};

#[derive(Debug, Clone)]
pub struct KeywordExpansion {
    keywords: Vec<String>,
    search_limit: u32,
    artists_per_keyword: usize,
    delay: Duration,
}

impl KeywordExpansion {
    pub fn new(keywords: Vec<String>) -> Self {
        let defaults = HarvestSettings::default();
        Self {
            keywords,
            search_limit: defaults.search_limit,
            artists_per_keyword: defaults.artists_per_keyword,
            delay: defaults.keyword_delay,
        }
    }

    pub fn from_settings(settings: &HarvestSettings) -> Self {
        Self {
            keywords: settings.keyword_genres.clone(),
            search_limit: settings.search_limit,
            artists_per_keyword: settings.artists_per_keyword,
            delay: settings.keyword_delay,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_artists_per_keyword(mut self, limit: usize) -> Self {
        self.artists_per_keyword = limit;
        self
    }

    async fn expand_keyword(
        &self,
        source: &dyn CatalogSource,
        keyword: &str,
        genres: &mut GenreSet,
    ) -> Result<bool, CatalogError> {
        let tracks = match source
            .search_tracks(&genre_query(keyword), self.search_limit)
            .await
        {
            Ok(tracks) => tracks,
            Err(e) if e.is_skippable() => {
                warn!(keyword = %keyword, error = %e, "Keyword search failed, skipping");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        for artist_id in lead_artist_ids(&tracks, self.artists_per_keyword) {
            match source.artist(artist_id).await {
                Ok(artist) => genres.extend(artist.genres),
                Err(e) if e.is_skippable() => {
                    debug!(artist_id = %artist_id, error = %e, "Artist fetch failed, skipping");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }
}

/// First artist of each track, skipping tracks without artists, capped at `limit`.
///
/// A lead artist without an id still uses up one slot of the cap.
fn lead_artist_ids(tracks: &[Track], limit: usize) -> Vec<&str> {
    tracks
        .iter()
        .filter_map(|t| t.artists.first())
        .take(limit)
        .filter_map(|a| a.id.as_deref())
        .collect()
}

#[async_trait]
impl DiscoveryStrategy for KeywordExpansion {
    fn stage_name(&self) -> &'static str {
        "keyword_expansion"
    }

    #[instrument(skip_all, fields(keywords = self.keywords.len()))]
    async fn discover(
        &self,
        source: &dyn CatalogSource,
        _seeds: &[String],
    ) -> Result<GenreSet, CatalogError> {
        let mut genres = GenreSet::new();

        for keyword in &self.keywords {
            info!(keyword = %keyword, "Searching keyword");
            if self.expand_keyword(source, keyword, &mut genres).await? {
                pause(self.delay).await;
            }
        }

        info!(genres = genres.len(), "Keyword expansion completed");
        Ok(genres)
    }
}
