//! Genre harvest pipeline executor.
//!
//! This module provides the [`HarvestPipeline`] coordinator that runs seed
//! discovery followed by every [`DiscoveryStrategy`] in order
//! (Enumeration → Keyword Expansion → Related Exploration) with:
//! - Async execution via `tokio`, strictly sequential
//! - Per-stage timing in [`HarvestStats`]
//! - Structured logging via `tracing`
//!
//! [`harvest`] adds the credential exchange in front of the pipeline and
//! [`collect_genres`] is the fail-soft entry point that never returns an error.

use std::time::Instant;

use tracing::{error, info};

use crate::auth::{request_token, AuthError};
use crate::client::CatalogClient;
use crate::config::{ConfigError, HarvestConfig, HarvestSettings};
use crate::harvest::strategies::{
    GenreSeedEnumeration, KeywordExpansion, RelatedArtistExplorer, SeedDiscovery,
};
use crate::harvest::traits::{union_genres, DiscoveryStrategy, GenreSet};
use crate::traits::{CatalogError, CatalogSource};

// ============================================================================
// Pipeline Types
// ============================================================================

/// Complete harvest result with the final genre list and statistics.
#[derive(Debug, Clone)]
pub struct HarvestResult {
    /// Deduplicated genres in byte-wise lexicographic order
    pub genres: Vec<String>,

    /// Performance and processing statistics
    pub stats: HarvestStats,
}

/// Statistics about the harvest operation.
#[derive(Debug, Default, Clone)]
pub struct HarvestStats {
    /// Total time spent on the pipeline (milliseconds)
    pub total_duration_ms: u64,

    /// Time spent finding seed artists (milliseconds)
    pub seed_duration_ms: u64,

    /// Number of seed artists found
    pub seed_artists: usize,

    /// One entry per strategy, in execution order
    pub stages: Vec<StageStats>,

    /// Size of the final union
    pub total_genres: usize,
}

/// Outcome of a single strategy.
#[derive(Debug, Clone)]
pub struct StageStats {
    pub stage: &'static str,
    /// Distinct genres this strategy found on its own
    pub genres: usize,
    pub duration_ms: u64,
}

// ============================================================================
// Pipeline Errors
// ============================================================================

/// Errors that abort a harvest run.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Credential exchange failed
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The HTTP client could not be constructed
    #[error("Failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// A stage hit a failure it cannot skip
    #[error("Stage '{stage}' failed: {source}")]
    Catalog {
        stage: String,
        #[source]
        source: CatalogError,
    },
}

// ============================================================================
// Pipeline Executor
// ============================================================================

/// Sequential genre harvest over a [`CatalogSource`].
///
/// # Example
///
/// ```ignore
/// use genre_harvester::config::HarvestSettings;
/// use genre_harvester::harvest::HarvestPipeline;
///
/// let pipeline = HarvestPipeline::new(&HarvestSettings::default());
/// let result = pipeline.execute(&client).await?;
/// println!("Harvested {} genres", result.genres.len());
/// ```
pub struct HarvestPipeline {
    /// Finds the seed artists shared by all strategies
    seeds: SeedDiscovery,

    /// Strategies in execution order
    strategies: Vec<Box<dyn DiscoveryStrategy>>,
}

impl HarvestPipeline {
    /// Creates the standard pipeline: enumeration, keyword expansion, then
    /// related-artist exploration, all tuned by `settings`.
    pub fn new(settings: &HarvestSettings) -> Self {
        Self {
            seeds: SeedDiscovery::from_settings(settings),
            strategies: vec![
                Box::new(GenreSeedEnumeration),
                Box::new(KeywordExpansion::from_settings(settings)),
                Box::new(RelatedArtistExplorer::from_settings(settings)),
            ],
        }
    }

    /// Creates a pipeline with a custom strategy list.
    pub fn with_strategies(
        seeds: SeedDiscovery,
        strategies: Vec<Box<dyn DiscoveryStrategy>>,
    ) -> Self {
        Self { seeds, strategies }
    }

    /// Names of the configured strategies, in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.stage_name()).collect()
    }

    /// Runs seed discovery and every strategy, then unions the results.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Catalog`] tagged with the stage name when a
    /// stage hits a failure it does not skip. Nothing partial is returned.
    pub async fn execute(
        &self,
        source: &dyn CatalogSource,
    ) -> Result<HarvestResult, PipelineError> {
        let start = Instant::now();
        let mut stats = HarvestStats::default();

        // ====================================================================
        // Seed discovery
        // ====================================================================

        info!("Starting seed discovery");
        let seed_start = Instant::now();
        let seeds = self
            .seeds
            .discover_seeds(source)
            .await
            .map_err(|e| PipelineError::Catalog {
                stage: "seed_discovery".to_string(),
                source: e,
            })?;
        stats.seed_duration_ms = seed_start.elapsed().as_millis() as u64;
        stats.seed_artists = seeds.len();
        info!(
            duration_ms = stats.seed_duration_ms,
            seeds = seeds.len(),
            "Seed discovery completed"
        );

        // ====================================================================
        // Strategies
        // ====================================================================

        let mut found: Vec<GenreSet> = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            let stage = strategy.stage_name();
            info!(stage, "Starting stage");
            let stage_start = Instant::now();

            let genres = strategy
                .discover(source, &seeds)
                .await
                .map_err(|e| PipelineError::Catalog {
                    stage: stage.to_string(),
                    source: e,
                })?;

            let stage_stats = StageStats {
                stage,
                genres: genres.len(),
                duration_ms: stage_start.elapsed().as_millis() as u64,
            };
            info!(
                stage,
                genres = stage_stats.genres,
                duration_ms = stage_stats.duration_ms,
                "Stage completed"
            );
            stats.stages.push(stage_stats);
            found.push(genres);
        }

        let genres = union_genres(&found);
        stats.total_genres = genres.len();
        stats.total_duration_ms = start.elapsed().as_millis() as u64;
        info!(
            total_genres = stats.total_genres,
            duration_ms = stats.total_duration_ms,
            "Harvest completed"
        );

        Ok(HarvestResult { genres, stats })
    }
}

/// Authenticates against the catalog and runs the standard pipeline.
pub async fn harvest(config: &HarvestConfig) -> Result<HarvestResult, PipelineError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    let http = builder
        .build()
        .map_err(|e| PipelineError::ClientInit(e.to_string()))?;

    let token = request_token(&http, &config.credentials, &config.token_url).await?;
    info!("Obtained catalog access token");

    let client = CatalogClient::new(config, &token)
        .map_err(|e| PipelineError::ClientInit(e.to_string()))?;
    HarvestPipeline::new(&config.settings).execute(&client).await
}

/// Fail-soft harvest: any error is logged and yields an empty list.
///
/// Callers that must tell "nothing found" from "run failed" should use
/// [`harvest`] instead.
pub async fn collect_genres(config: &HarvestConfig) -> Vec<String> {
    match harvest(config).await {
        Ok(result) => result.genres,
        Err(e) => {
            error!(error = %e, "Genre harvest failed");
            Vec::new()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
