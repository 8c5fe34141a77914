//! Plain enumeration of the catalog's advertised genre seeds.

use async_trait::async_trait;
use tracing::info;

use crate::harvest::traits::{DiscoveryStrategy, GenreSet};
use crate::traits::{CatalogError, CatalogSource};

/// Reads the available-genre-seeds endpoint. Any failure aborts the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenreSeedEnumeration;

#[async_trait]
impl DiscoveryStrategy for GenreSeedEnumeration {
    fn stage_name(&self) -> &'static str {
        "enumeration"
    }

    async fn discover(
        &self,
        source: &dyn CatalogSource,
        _seeds: &[String],
    ) -> Result<GenreSet, CatalogError> {
        let genres: GenreSet = source.available_genre_seeds().await?.into_iter().collect();
        info!(genres = genres.len(), "Enumerated available genre seeds");
        Ok(genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::testing::MockCatalog;

    #[tokio::test]
    async fn test_collects_advertised_genres() {
        let catalog = MockCatalog::new().with_genre_seeds(&["acoustic", "afrobeat", "acoustic"]);
        let genres = GenreSeedEnumeration.discover(&catalog, &[]).await.unwrap();
        assert_eq!(genres.into_iter().collect::<Vec<_>>(), vec!["acoustic", "afrobeat"]);
    }

    #[tokio::test]
    async fn test_endpoint_failure_is_propagated() {
        let catalog = MockCatalog::new().failing_genre_seeds();
        let result = GenreSeedEnumeration.discover(&catalog, &[]).await;
        assert!(matches!(result, Err(CatalogError::Status { status: 404, .. })));
    }
}
