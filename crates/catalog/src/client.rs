//! The movie catalog client.
//!
//! `CatalogProvider` is the seam the wizard and pipeline program against;
//! `TmdbClient` is its HTTP implementation over the TMDB v3 REST API.
//!
//! Endpoints consumed:
//! 1. Discovery: `/discover/movie` filtered by genres, max runtime, region
//!    and popularity floor, sorted by popularity, first page only
//! 2. Details: `/movie/{id}`
//! 3. Providers: `/movie/{id}/watch/providers`, reduced to the configured
//!    region's subset

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::types::{CandidateMovie, GenreId, MovieDetails, MovieId, WatchProviders};

/// Every discover query carries this vote-count floor, so sparsely rated
/// titles never reach the ranking stage.
const VOTE_COUNT_FLOOR: u32 = 100;

/// Abstraction over the external movie catalog.
///
/// Search and detail fetches propagate errors; provider and availability
/// lookups fail open, since "no known offers" is a valid, common outcome.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search for candidate movies matching the given genres (all of them,
    /// per the catalog's AND semantics; empty means unconstrained) and a
    /// maximum runtime in minutes.
    async fn search_by_criteria(
        &self,
        genre_ids: &[GenreId],
        max_runtime_minutes: u32,
    ) -> Result<Vec<CandidateMovie>>;

    /// Fetch full metadata for one movie.
    async fn fetch_details(&self, movie_id: MovieId) -> Result<MovieDetails>;

    /// Fetch the watch offers for one movie, scoped to the client's
    /// region. Any failure degrades to the empty structure.
    async fn fetch_watch_providers(&self, movie_id: MovieId) -> WatchProviders;

    /// True iff the movie has at least one streaming, rental or purchase
    /// offer in the client's region. Never fails; an unreachable upstream
    /// reads as "not available".
    async fn check_availability(&self, movie_id: MovieId) -> bool {
        self.fetch_watch_providers(movie_id).await.has_any_offer()
    }
}

#[derive(Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    results: Vec<CandidateMovie>,
}

#[derive(Deserialize)]
struct ProvidersEnvelope {
    #[serde(default)]
    results: HashMap<String, WatchProviders>,
}

/// HTTP client for the TMDB API.
///
/// Credential, base URL, region and language come from an explicit
/// [`CatalogConfig`]; nothing is read from globals after construction.
#[derive(Clone)]
pub struct TmdbClient {
    http: HttpClient,
    config: CatalogConfig,
}

impl TmdbClient {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            http: HttpClient::new(),
            config,
        }
    }

    /// The region this client scopes provider data to.
    pub fn region(&self) -> &str {
        &self.config.recocine_region
    }

    /// Query parameters for a discover request. Kept separate from the
    /// request itself so the construction is unit-testable.
    fn discover_query(
        &self,
        genre_ids: &[GenreId],
        max_runtime_minutes: u32,
    ) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("api_key", self.config.tmdb_api_key.clone()),
            ("language", self.config.recocine_language.clone()),
            ("sort_by", "popularity.desc".to_string()),
            ("include_adult", "false".to_string()),
            ("include_video", "false".to_string()),
            ("page", "1".to_string()),
            ("with_runtime.lte", max_runtime_minutes.to_string()),
            ("region", self.config.recocine_region.clone()),
            ("vote_count.gte", VOTE_COUNT_FLOOR.to_string()),
            (
                "popularity.gte",
                self.config.recocine_min_popularity.to_string(),
            ),
        ];

        // An empty selection means "no genre constraint", not "no results"
        if !genre_ids.is_empty() {
            let joined = genre_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            query.push(("with_genres", joined));
        }

        query
    }

    async fn try_fetch_watch_providers(&self, movie_id: MovieId) -> Result<WatchProviders> {
        let url = format!("{}/movie/{}/watch/providers", self.config.tmdb_base_url, movie_id);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.config.tmdb_api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                status: response.status().as_u16(),
            });
        }

        let mut envelope: ProvidersEnvelope = response.json().await?;

        // The endpoint returns offers for every region at once; only the
        // configured region matters here. A region with no entry is the
        // empty structure, not an error.
        Ok(envelope
            .results
            .remove(self.config.recocine_region.as_str())
            .unwrap_or_default())
    }
}

#[async_trait]
impl CatalogProvider for TmdbClient {
    async fn search_by_criteria(
        &self,
        genre_ids: &[GenreId],
        max_runtime_minutes: u32,
    ) -> Result<Vec<CandidateMovie>> {
        let url = format!("{}/discover/movie", self.config.tmdb_base_url);
        let query = self.discover_query(genre_ids, max_runtime_minutes);

        let response = self.http.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!(status, "catalog discover request rejected");
            return Err(CatalogError::Status { status });
        }

        let body = response.text().await?;
        let parsed: DiscoverResponse = serde_json::from_str(&body).map_err(|e| {
            debug!(body = %body, "undecodable discover response");
            CatalogError::Decode(e.to_string())
        })?;

        info!(
            genres = ?genre_ids,
            max_runtime = max_runtime_minutes,
            results = parsed.results.len(),
            "catalog search completed"
        );

        Ok(parsed.results)
    }

    async fn fetch_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
        let url = format!("{}/movie/{}", self.config.tmdb_base_url, movie_id);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.config.tmdb_api_key.as_str()),
                ("language", self.config.recocine_language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                status: response.status().as_u16(),
            });
        }

        let details = response.json::<MovieDetails>().await?;
        Ok(details)
    }

    async fn fetch_watch_providers(&self, movie_id: MovieId) -> WatchProviders {
        match self.try_fetch_watch_providers(movie_id).await {
            Ok(providers) => providers,
            Err(e) => {
                warn!(movie_id, error = %e, "provider lookup failed, treating as no offers");
                WatchProviders::default()
            }
        }
    }
}
