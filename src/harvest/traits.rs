//! Core abstractions shared by the discovery strategies.
//!
//! - Strategy composition via [`DiscoveryStrategy`]
//! - The genre collection type [`GenreSet`] and its final materialization
//!   via [`union_genres`]

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;

use crate::traits::{CatalogError, CatalogSource};

/// Set of genre labels.
///
/// Labels are compared byte-wise, so iteration order is plain lexicographic
/// order on UTF-8 (uppercase ASCII sorts before lowercase). No case folding
/// or normalization is applied.
pub type GenreSet = BTreeSet<String>;

/// One independent way of discovering genres from the catalog.
///
/// Strategies run sequentially inside [`HarvestPipeline`](super::HarvestPipeline)
/// and share the seed artists found before any strategy starts.
///
/// # Errors
///
/// Implementations swallow per-item failures that
/// [`CatalogError::is_skippable`] allows and return `Err` only for failures
/// that should abort the whole run.
#[async_trait]
pub trait DiscoveryStrategy: Send + Sync {
    /// Human-readable name used in logs and [`StageStats`](super::StageStats).
    fn stage_name(&self) -> &'static str;

    /// Runs the strategy to completion and returns every genre it found.
    async fn discover(
        &self,
        source: &dyn CatalogSource,
        seeds: &[String],
    ) -> Result<GenreSet, CatalogError>;
}

/// Unions genre sets into the final sorted, duplicate-free list.
///
/// The result depends only on the union of the inputs, not on how many
/// sets there are or in which order they are given.
pub fn union_genres<'a, I>(sets: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a GenreSet>,
{
    sets.into_iter()
        .flatten()
        .cloned()
        .collect::<GenreSet>()
        .into_iter()
        .collect()
}

/// Fixed courtesy delay between catalog calls. Zero means no pause at all.
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
