//! Seed artist discovery: one representative artist per seed genre.

use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::config::HarvestSettings;
use crate::harvest::traits::pause;
use crate::traits::{genre_query, CatalogError, CatalogSource};

#[derive(Debug, Clone)]
pub struct SeedDiscovery {
    genres: Vec<String>,
    delay: Duration,
}

impl SeedDiscovery {
    pub fn new(genres: Vec<String>, delay: Duration) -> Self {
        Self { genres, delay }
    }

    pub fn from_settings(settings: &HarvestSettings) -> Self {
        Self::new(settings.seed_genres.clone(), settings.seed_delay)
    }

    /// Returns the first matching artist id per genre, in genre order.
    ///
    /// Genres whose search fails or finds nobody contribute nothing, so the
    /// result may be shorter than the genre list.
    #[instrument(skip_all, fields(genres = self.genres.len()))]
    pub async fn discover_seeds(
        &self,
        source: &dyn CatalogSource,
    ) -> Result<Vec<String>, CatalogError> {
        let mut seeds = Vec::with_capacity(self.genres.len());

        for genre in &self.genres {
            let artists = match source.search_artists(&genre_query(genre), 1).await {
                Ok(artists) => artists,
                Err(e) if e.is_skippable() => {
                    warn!(genre = %genre, error = %e, "Seed search failed, skipping");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if let Some(id) = artists.into_iter().next().and_then(|a| a.id) {
                seeds.push(id);
            }

            pause(self.delay).await;
        }

        info!(seeds = seeds.len(), "Seed discovery completed");
        Ok(seeds)
    }
}
