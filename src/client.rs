//! HTTP client for the catalog Web API.
//!
//! [`CatalogClient`] wraps one `reqwest::Client` carrying the bearer token as
//! a default header. [`CatalogClient::get_json`] and
//! [`CatalogClient::post_json`] issue a single authenticated call and return
//! the body as a generic JSON value; the [`CatalogSource`] implementation
//! decodes those values into the typed models.
//!
//! There is no retry: every error is reported to the caller, which decides
//! whether to skip or abort.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::auth::AccessToken;
use crate::config::HarvestConfig;
use crate::model::{Artist, ArtistRef, ArtistSearch, GenreSeeds, RelatedArtists, Track, TrackSearch};
use crate::traits::{CatalogError, CatalogSource};

const GENRE_SEEDS_PATH: &str = "v1/recommendations/available-genre-seeds";
const SEARCH_PATH: &str = "v1/search";
const ARTISTS_PATH: &str = "v1/artists";

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Builds a client authenticated with `token` against `config.api_url`.
    pub fn new(config: &HarvestConfig, token: &AccessToken) -> Result<Self, CatalogError> {
        let base_url = config.api_url.as_str().trim_end_matches('/').to_string();

        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| CatalogError::Transport {
                url: base_url.clone(),
                reason: "access token contains invalid header characters".into(),
            })?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| CatalogError::Transport {
                url: base_url.clone(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET {base_url}/{path}?{query}` returning the parsed JSON body.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, CatalogError> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");
        let request = self.http.get(&url).query(query);
        Self::send(request, url).await
    }

    /// `POST {base_url}/{path}` with a JSON body, returning the parsed JSON body.
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, CatalogError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let request = self.http.post(&url).json(body);
        Self::send(request, url).await
    }

    async fn send(request: reqwest::RequestBuilder, url: String) -> Result<Value, CatalogError> {
        let resp = request
            .send()
            .await
            .map_err(|e| transport_error(e, url.clone()))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status {
                status: resp.status().as_u16(),
                url,
            });
        }

        resp.json().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout { url }
            } else {
                CatalogError::Decode {
                    url,
                    reason: e.to_string(),
                }
            }
        })
    }

    async fn get_typed<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let value = self.get_json(path, query).await?;
        serde_json::from_value(value).map_err(|e| CatalogError::Decode {
            url: self.url(path),
            reason: e.to_string(),
        })
    }
}

fn transport_error(e: reqwest::Error, url: String) -> CatalogError {
    if e.is_timeout() {
        CatalogError::Timeout { url }
    } else {
        CatalogError::Transport {
            url,
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn available_genre_seeds(&self) -> Result<Vec<String>, CatalogError> {
        let seeds: GenreSeeds = self.get_typed(GENRE_SEEDS_PATH, &[]).await?;
        Ok(seeds.genres)
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, CatalogError> {
        let limit = limit.to_string();
        let found: TrackSearch = self
            .get_typed(SEARCH_PATH, &[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .await?;
        Ok(found.tracks.items)
    }

    async fn search_artists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ArtistRef>, CatalogError> {
        let limit = limit.to_string();
        let found: ArtistSearch = self
            .get_typed(SEARCH_PATH, &[("q", query), ("type", "artist"), ("limit", limit.as_str())])
            .await?;
        Ok(found.artists.items)
    }

    async fn artist(&self, id: &str) -> Result<Artist, CatalogError> {
        self.get_typed(&format!("{ARTISTS_PATH}/{id}"), &[]).await
    }

    async fn related_artists(&self, id: &str) -> Result<Vec<ArtistRef>, CatalogError> {
        let related: RelatedArtists = self
            .get_typed(&format!("{ARTISTS_PATH}/{id}/related-artists"), &[])
            .await?;
        Ok(related.artists)
    }
}
