use serde::{Deserialize, Serialize};

/// Response of the available-genre-seeds endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreSeeds {
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Full artist object as returned by the artist-detail endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>, // declared genres, as published by the catalog
}

/// Simplified artist object embedded in tracks, search hits and related lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>, // null for some local or unavailable entries
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackSearch {
    #[serde(default)]
    pub tracks: Paging<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistSearch {
    #[serde(default)]
    pub artists: Paging<ArtistRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedArtists {
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

/// Body of a successful client-credentials token response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
