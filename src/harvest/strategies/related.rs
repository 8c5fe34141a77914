//! Related-artist graph exploration.
//!
//! Walks the "related artists" relation depth-first from each seed, up to a
//! fixed depth, following at most `fan_out` related artists per node and
//! never visiting an artist twice. The relation is allowed to contain cycles.
//!
//! The walk uses an explicit worklist instead of recursion. A node expands into
//! a `Settle` marker followed by its children, so the children's
//! subtrees complete before the marker pops and the per-node pause runs.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::config::HarvestSettings;
use crate::harvest::traits::{pause, DiscoveryStrategy, GenreSet};
use crate::traits::{CatalogError, CatalogSource};

enum Frame {
    Visit { id: String, depth: usize },
    /// All children of a node have been explored.
    Settle,
}

#[derive(Debug, Clone)]
pub struct RelatedArtistExplorer {
    max_depth: usize,
    fan_out: usize,
    delay: Duration,
}

impl Default for RelatedArtistExplorer {
    fn default() -> Self {
        Self::from_settings(&HarvestSettings::default())
    }
}

impl RelatedArtistExplorer {
    pub fn new(max_depth: usize, fan_out: usize, delay: Duration) -> Self {
        Self {
            max_depth,
            fan_out,
            delay,
        }
    }

    pub fn from_settings(settings: &HarvestSettings) -> Self {
        Self::new(settings.max_depth, settings.fan_out, settings.explore_delay)
    }

    /// Explores from `seeds` (depth 0, in order) and returns every genre seen.
    ///
    /// `visited` is shared by all seeds; ids already in it are not explored.
    /// A skippable failure on a node abandons that node's branch only.
    pub async fn explore(
        &self,
        source: &dyn CatalogSource,
        seeds: &[String],
        visited: &mut HashSet<String>,
    ) -> Result<GenreSet, CatalogError> {
        let mut genres = GenreSet::new();
        let mut stack: Vec<Frame> = seeds
            .iter()
            .rev()
            .map(|id| Frame::Visit {
                id: id.clone(),
                depth: 0,
            })
            .collect();

        while let Some(frame) = stack.pop() {
            let (id, depth) = match frame {
                Frame::Visit { id, depth } => (id, depth),
                Frame::Settle => {
                    pause(self.delay).await;
                    continue;
                }
            };

            if depth > self.max_depth || visited.contains(&id) {
                continue;
            }
            visited.insert(id.clone());

            let artist = match source.artist(&id).await {
                Ok(artist) => artist,
                Err(e) if e.is_skippable() => {
                    debug!(artist_id = %id, error = %e, "Artist fetch failed, pruning branch");
                    continue;
                }
                Err(e) => return Err(e),
            };
            genres.extend(artist.genres);

            let related = match source.related_artists(&id).await {
                Ok(related) => related,
                Err(e) if e.is_skippable() => {
                    debug!(artist_id = %id, error = %e, "Related fetch failed, pruning branch");
                    continue;
                }
                Err(e) => return Err(e),
            };

            // References without an id still count toward the fan-out.
            let children: Vec<Frame> = related
                .into_iter()
                .take(self.fan_out)
                .filter_map(|a| a.id)
                .map(|id| Frame::Visit {
                    id,
                    depth: depth + 1,
                })
                .collect();
            stack.push(Frame::Settle);
            stack.extend(children.into_iter().rev());
        }

        Ok(genres)
    }
}

#[async_trait]
impl DiscoveryStrategy for RelatedArtistExplorer {
    fn stage_name(&self) -> &'static str {
        "related_exploration"
    }

    #[instrument(skip_all, fields(seeds = seeds.len(), max_depth = self.max_depth))]
    async fn discover(
        &self,
        source: &dyn CatalogSource,
        seeds: &[String],
    ) -> Result<GenreSet, CatalogError> {
        let mut visited = HashSet::new();
        let genres = self.explore(source, seeds, &mut visited).await?;
        info!(
            visited = visited.len(),
            genres = genres.len(),
            "Related-artist exploration completed"
        );
        Ok(genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::testing::{MockCatalog, NULL_ID};

    fn explorer(max_depth: usize) -> RelatedArtistExplorer {
        RelatedArtistExplorer::new(max_depth, 5, Duration::ZERO)
    }

    fn seeds(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    /// Chain d0 -> d1 -> d2 -> d3 -> d4, each with a genre named after its depth.
    fn chain() -> MockCatalog {
        MockCatalog::new()
            .with_artist("d0", &["g0"], &["d1"])
            .with_artist("d1", &["g1"], &["d2"])
            .with_artist("d2", &["g2"], &["d3"])
            .with_artist("d3", &["g3"], &["d4"])
            .with_artist("d4", &["g4"], &[])
    }

    #[tokio::test]
    async fn test_depth_beyond_max_is_never_visited() {
        let catalog = chain();
        let genres = explorer(2)
            .discover(&catalog, &seeds(&["d0"]))
            .await
            .unwrap();

        assert_eq!(genres.into_iter().collect::<Vec<_>>(), vec!["g0", "g1", "g2"]);
        assert_eq!(catalog.artist_fetches("d3"), 0);
    }

    #[tokio::test]
    async fn test_raising_max_depth_reaches_the_next_level() {
        let catalog = chain();
        let genres = explorer(3)
            .discover(&catalog, &seeds(&["d0"]))
            .await
            .unwrap();

        assert!(genres.contains("g3"));
        assert!(!genres.contains("g4"));
    }

    #[tokio::test]
    async fn test_cycle_is_fetched_once_per_artist() {
        let catalog = MockCatalog::new()
            .with_artist("a", &["ga"], &["b"])
            .with_artist("b", &["gb"], &["a"]);

        let genres = explorer(5)
            .discover(&catalog, &seeds(&["a", "b"]))
            .await
            .unwrap();

        assert_eq!(genres.len(), 2);
        assert_eq!(catalog.artist_fetches("a"), 1);
        assert_eq!(catalog.artist_fetches("b"), 1);
    }

    #[tokio::test]
    async fn test_fan_out_caps_followed_related_artists() {
        let related = ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9"];
        let mut catalog = MockCatalog::new().with_artist("hub", &["hub"], &related);
        for id in related {
            catalog = catalog.with_artist(id, &[id], &[]);
        }

        let genres = explorer(2)
            .discover(&catalog, &seeds(&["hub"]))
            .await
            .unwrap();

        // hub itself plus its first five related artists
        assert_eq!(catalog.total_artist_fetches(), 6);
        assert!(genres.contains("r4"));
        assert!(!genres.contains("r5"));
    }

    #[tokio::test]
    async fn test_traversal_is_depth_first_in_list_order() {
        let catalog = MockCatalog::new()
            .with_artist("s", &[], &["x", "y"])
            .with_artist("x", &[], &["x1"])
            .with_artist("x1", &[], &[])
            .with_artist("y", &[], &[]);

        explorer(2)
            .discover(&catalog, &seeds(&["s"]))
            .await
            .unwrap();

        let fetched: Vec<String> = catalog
            .calls()
            .into_iter()
            .filter_map(|c| c.strip_prefix("artist:").map(str::to_string))
            .collect();
        assert_eq!(fetched, vec!["s", "x", "x1", "y"]);
    }

    #[tokio::test]
    async fn test_failed_branch_does_not_stop_siblings() {
        let catalog = MockCatalog::new()
            .with_artist("s", &["root"], &["bad", "good"])
            .failing_artist("bad")
            .with_artist("good", &["survivor"], &[]);

        let genres = explorer(2)
            .discover(&catalog, &seeds(&["s"]))
            .await
            .unwrap();

        assert!(genres.contains("root"));
        assert!(genres.contains("survivor"));
    }

    #[tokio::test]
    async fn test_related_failure_keeps_the_artists_own_genres() {
        let catalog = MockCatalog::new()
            .with_artist("s", &["root"], &["x"])
            .with_artist("x", &["child"], &[])
            .failing_related("s");

        let genres = explorer(2)
            .discover(&catalog, &seeds(&["s"]))
            .await
            .unwrap();

        assert_eq!(genres.into_iter().collect::<Vec<_>>(), vec!["root"]);
        assert_eq!(catalog.artist_fetches("x"), 0);
    }

    #[tokio::test]
    async fn test_externally_owned_visited_set_is_respected() {
        let catalog = MockCatalog::new()
            .with_artist("a", &["ga"], &["b"])
            .with_artist("b", &["gb"], &[]);
        let mut visited: HashSet<String> = ["b".to_string()].into_iter().collect();

        let genres = explorer(2)
            .explore(&catalog, &seeds(&["a"]), &mut visited)
            .await
            .unwrap();

        assert_eq!(genres.into_iter().collect::<Vec<_>>(), vec!["ga"]);
        assert_eq!(catalog.artist_fetches("b"), 0);
        assert!(visited.contains("a"));
    }

    #[tokio::test]
    async fn test_references_without_id_use_up_fan_out() {
        let catalog = MockCatalog::new()
            .with_artist("s", &["root"], &[NULL_ID, "a", "b"])
            .with_artist("a", &["ga"], &[])
            .with_artist("b", &["gb"], &[]);

        let genres = RelatedArtistExplorer::new(2, 2, Duration::ZERO)
            .discover(&catalog, &seeds(&["s"]))
            .await
            .unwrap();

        assert_eq!(genres.into_iter().collect::<Vec<_>>(), vec!["ga", "root"]);
        assert_eq!(catalog.total_artist_fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_once_per_settled_node() {
        // s -> {x, y}, x -> x1; y's related list fails, so y never settles.
        let catalog = MockCatalog::new()
            .with_artist("s", &[], &["x", "y"])
            .with_artist("x", &[], &["x1"])
            .with_artist("x1", &[], &[])
            .with_artist("y", &[], &[])
            .failing_related("y");
        let start = tokio::time::Instant::now();

        RelatedArtistExplorer::new(2, 5, Duration::from_millis(500))
            .discover(&catalog, &seeds(&["s"]))
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::from_millis(1500));
    }
}
