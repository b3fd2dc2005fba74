//! # Catalog Crate
//!
//! This crate wraps the external movie database (TMDB) behind a small,
//! trait-based client, and owns everything wire-facing:
//!
//! - Domain types mirroring the catalog's JSON shapes (`CandidateMovie`,
//!   `MovieDetails`, `WatchProviders`)
//! - The static genre catalog used by the selection wizard
//! - `CatalogProvider`, the seam the rest of the system programs against,
//!   and `TmdbClient`, its HTTP implementation
//! - Explicit configuration (`CatalogConfig`) so the API credential and
//!   region are constructor inputs, never module globals
//!
//! ## Error philosophy
//! Search and detail fetches propagate `CatalogError` to the caller.
//! Provider and availability lookups never do: absence of watch offers is
//! a common, valid outcome, so those calls degrade to an empty structure
//! or `false` instead of failing the whole pipeline on one bad item.

pub mod client;
pub mod config;
pub mod error;
pub mod genres;
pub mod types;

// Re-export commonly used items
pub use client::{CatalogProvider, TmdbClient};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use genres::{genre_catalog, genre_label};
pub use types::{
    CandidateMovie, Genre, GenreId, MovieDetails, MovieId, PosterSize, ProviderEntry,
    WatchProviders, poster_url,
};
