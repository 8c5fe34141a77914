//! Run configuration.
//!
//! [`HarvestConfig`] carries everything needed to reach the catalog
//! (endpoints, credentials, optional timeout) and is usually loaded from the
//! environment. [`HarvestSettings`] carries the discovery tunables and the
//! keyword lists, kept as data so tests can swap in small fixtures.

use std::time::Duration;

use url::Url;
use zeroize::Zeroizing;

/// Genres used to pick one seed artist each for related-artist exploration.
pub const DEFAULT_SEED_GENRES: &[&str] = &[
    "pop",
    "rock",
    "hip-hop",
    "jazz",
    "classical",
    "electronic",
    "country",
    "metal",
];

/// Keywords searched by keyword expansion.
pub const DEFAULT_KEYWORD_GENRES: &[&str] = &[
    "alternative",
    "ambient",
    "blues",
    "classical",
    "country",
    "dance",
    "electronic",
    "folk",
    "funk",
    "hip-hop",
    "indie",
    "jazz",
    "latin",
    "metal",
    "pop",
    "punk",
    "r&b",
    "reggae",
    "rock",
    "soul",
    "world",
    "techno",
    "trance",
    "house",
    "edm",
    "disco",
    "drill",
    "grime",
    "trap",
    "k-pop",
    "j-pop",
    "lo-fi",
    "experimental",
    "afrobeat",
    "reggaeton",
    "salsa",
    "flamenco",
    "opera",
    "orchestral",
    "vaporwave",
    "synthwave",
    "hardstyle",
    "hardcore",
    "dubstep",
    "drum-and-bass",
    "garage",
    "breakbeat",
];

const DEFAULT_API_URL: &str = "https://api.spotify.com";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Application credentials for the client-credentials grant.
///
/// `Debug` redacts the secret; both values are wiped from memory on drop.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: Zeroizing<String>,
    pub client_secret: Zeroizing<String>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Zeroizing::new(client_id.into()),
            client_secret: Zeroizing::new(client_secret.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id.as_str())
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Connection settings for the catalog service.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Base URL of the catalog Web API (paths such as `/v1/artists/{id}` are appended).
    pub api_url: Url,
    /// Client-credentials token endpoint.
    pub token_url: Url,
    pub credentials: Credentials,
    /// Per-request timeout in seconds. `None` keeps the HTTP client default
    /// (no timeout).
    pub timeout_secs: Option<u64>,
    pub settings: HarvestSettings,
}

impl HarvestConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SPOTIFY_CLIENT_ID` (required)
    /// - `SPOTIFY_CLIENT_SECRET` (required)
    /// - `SPOTIFY_API_URL` (default: `https://api.spotify.com`)
    /// - `SPOTIFY_TOKEN_URL` (default: `https://accounts.spotify.com/api/token`)
    /// - `SPOTIFY_TIMEOUT_SECS` (optional, whole seconds; unset means no timeout)
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = std::env::var("SPOTIFY_CLIENT_ID")
            .map_err(|_| ConfigError::MissingVar("SPOTIFY_CLIENT_ID"))?;
        let client_secret = std::env::var("SPOTIFY_CLIENT_SECRET")
            .map_err(|_| ConfigError::MissingVar("SPOTIFY_CLIENT_SECRET"))?;

        Ok(Self {
            api_url: env_url("SPOTIFY_API_URL", DEFAULT_API_URL)?,
            token_url: env_url("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL)?,
            credentials: Credentials::new(client_id, client_secret),
            timeout_secs: env_secs("SPOTIFY_TIMEOUT_SECS")?,
            settings: HarvestSettings::default(),
        })
    }

    /// Configuration with explicit endpoints, e.g. a local mock server.
    pub fn with_endpoints(
        api_url: &str,
        token_url: &str,
        credentials: Credentials,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_url("api_url", api_url)?,
            token_url: parse_url("token_url", token_url)?,
            credentials,
            timeout_secs: None,
            settings: HarvestSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: HarvestSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// The configured per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Discovery tunables and keyword lists.
#[derive(Debug, Clone)]
pub struct HarvestSettings {
    pub seed_genres: Vec<String>,
    pub keyword_genres: Vec<String>,
    /// Tracks requested per keyword search.
    pub search_limit: u32,
    /// Artists inspected per keyword.
    pub artists_per_keyword: usize,
    /// Deepest related-artist level visited (seeds are depth 0).
    pub max_depth: usize,
    /// Related artists followed per visited artist.
    pub fan_out: usize,
    /// Pause after each successful seed lookup.
    pub seed_delay: Duration,
    /// Pause after each searched keyword.
    pub keyword_delay: Duration,
    /// Pause after each explored artist's subtree.
    pub explore_delay: Duration,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            seed_genres: to_owned_list(DEFAULT_SEED_GENRES),
            keyword_genres: to_owned_list(DEFAULT_KEYWORD_GENRES),
            search_limit: 50,
            artists_per_keyword: 5,
            max_depth: 2,
            fan_out: 5,
            seed_delay: Duration::from_millis(500),
            keyword_delay: Duration::from_secs(1),
            explore_delay: Duration::from_millis(500),
        }
    }
}

impl HarvestSettings {
    /// Default tunables with every pause disabled.
    pub fn immediate() -> Self {
        Self {
            seed_delay: Duration::ZERO,
            keyword_delay: Duration::ZERO,
            explore_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_seed_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seed_genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keyword_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keyword_genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out;
        self
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn env_url(var: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
}

fn env_secs(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => parse_secs(var, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_secs(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber(var, raw.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("{0} must be a whole number of seconds, got {1:?}")]
    InvalidNumber(&'static str, String),
}
