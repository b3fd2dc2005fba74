//! Pipeline for narrowing and ordering catalog search results.
//!
//! This crate provides the two post-search stages:
//! 1. `AvailabilityFilter` removes movies with no watch offer in the
//!    target region (one concurrent check per movie)
//! 2. `ranking::rank` orders the survivors by genre match, then rating
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{AvailabilityFilter, ranking};
//!
//! let filter = AvailabilityFilter::new(provider.clone());
//! let available = filter.filter(candidates).await;
//! let ranked = ranking::rank(available, &chosen_genre_ids);
//! ```

pub mod availability;
pub mod ranking;

// Re-export main types
pub use availability::AvailabilityFilter;
pub use ranking::{RankedMovie, genre_match_score, rank};
