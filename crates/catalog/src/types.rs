//! Domain types for the movie catalog.
//!
//! These structs are serde views of the TMDB response shapes; the rest of
//! the system only depends on the fields enumerated here, not on anything
//! else the upstream happens to return.

use serde::{Deserialize, Serialize};

/// Unique identifier for a genre (TMDB genre id, e.g. 28 = Action)
pub type GenreId = u32;

/// Unique identifier for a movie in the catalog
pub type MovieId = u64;

/// A movie genre as exposed by the catalog.
///
/// The selection deck is built from the static catalog in [`crate::genres`];
/// detail responses embed the same shape per movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// One raw item from a catalog search, before ranking.
///
/// Fields the upstream may omit are defaulted rather than failing the
/// whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMovie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    #[serde(default)]
    pub popularity: f32,
}

/// Full metadata for a single movie, fetched lazily for the details view.
///
/// Unlike search results, the detail endpoint embeds full genre objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// One distribution platform entry (e.g. Netflix) within a provider list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub provider_id: u32,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

/// Region-scoped watch offers for a movie, grouped by distribution method.
///
/// `Default` is the "no known offers" value, which is what every failure
/// path degrades to — absence of providers is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchProviders {
    #[serde(default)]
    pub flatrate: Vec<ProviderEntry>,
    #[serde(default)]
    pub rent: Vec<ProviderEntry>,
    #[serde(default)]
    pub buy: Vec<ProviderEntry>,
}

impl WatchProviders {
    /// True iff the movie has at least one offer of any kind in the
    /// region this structure was scoped to.
    pub fn has_any_offer(&self) -> bool {
        !self.flatrate.is_empty() || !self.rent.is_empty() || !self.buy.is_empty()
    }
}

const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Poster sizes actually used by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterSize {
    W200,
    W300,
    Original,
}

impl PosterSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterSize::W200 => "w200",
            PosterSize::W300 => "w300",
            PosterSize::Original => "original",
        }
    }
}

/// Build a full image URL from a poster path returned by the catalog.
pub fn poster_url(path: &str, size: PosterSize) -> String {
    format!("{}/{}{}", TMDB_IMAGE_BASE, size.as_str(), path)
}
