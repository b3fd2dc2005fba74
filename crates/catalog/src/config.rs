//! Catalog client configuration.
//!
//! The API credential and the fixed target region/language are explicit
//! constructor inputs, loaded once from the environment at startup.

use anyhow::Context;
use serde::Deserialize;

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_region() -> String {
    "FR".to_string()
}

fn default_language() -> String {
    "fr-FR".to_string()
}

fn default_min_popularity() -> f32 {
    40.0
}

/// Configuration for [`crate::TmdbClient`].
///
/// Field names map to environment variables via envy
/// (`TMDB_API_KEY`, `TMDB_BASE_URL`, `RECOCINE_REGION`,
/// `RECOCINE_LANGUAGE`, `RECOCINE_MIN_POPULARITY`); everything except the
/// API key has a default matching the original deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub tmdb_api_key: String,
    #[serde(default = "default_base_url")]
    pub tmdb_base_url: String,
    #[serde(default = "default_region")]
    pub recocine_region: String,
    #[serde(default = "default_language")]
    pub recocine_language: String,
    #[serde(default = "default_min_popularity")]
    pub recocine_min_popularity: f32,
}

impl CatalogConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        envy::from_env::<Self>().context("failed to load catalog configuration from environment")
    }

    /// Build a config with defaults for everything but the credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            tmdb_api_key: api_key.into(),
            tmdb_base_url: default_base_url(),
            recocine_region: default_region(),
            recocine_language: default_language(),
            recocine_min_popularity: default_min_popularity(),
        }
    }
}
