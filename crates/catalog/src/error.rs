//! Error types for the catalog crate.

use thiserror::Error;

/// Errors surfaced by catalog search and detail fetches.
///
/// Provider/availability lookups deliberately never return these; they
/// degrade to empty data instead (see [`crate::client`]).
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog service answered with a non-success HTTP status
    #[error("catalog service returned status {status}")]
    Status { status: u16 },

    /// Transport-level failure reaching the catalog service
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("malformed catalog response: {0}")]
    Decode(String),
}

/// Convenience alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
