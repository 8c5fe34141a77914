//! Harvest module - genre discovery and aggregation pipeline.
//!
//! This module provides the core abstractions for the genre harvester:
//! - **Traits**: [`DiscoveryStrategy`] for pluggable discovery methods
//! - **Strategies**: enumeration, keyword expansion, related-artist exploration
//! - **Pipeline**: sequential async executor via [`pipeline::HarvestPipeline`]

pub mod pipeline;
pub mod strategies;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use traits::{union_genres, DiscoveryStrategy, GenreSet};

pub use strategies::{GenreSeedEnumeration, KeywordExpansion, RelatedArtistExplorer, SeedDiscovery};

pub use pipeline::{
    collect_genres, harvest, HarvestPipeline, HarvestResult, HarvestStats, PipelineError,
    StageStats,
};
