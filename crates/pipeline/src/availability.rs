//! Availability narrowing.
//!
//! One `check_availability` call per candidate, all in flight at once; the
//! fan-out is unbounded because the input is at most one catalog result
//! page (~20 items). A slow or failed check only affects its own item.

use std::sync::Arc;

use catalog::{CandidateMovie, CatalogProvider};
use futures::future::join_all;
use tracing::debug;

/// Narrows a result set to the movies confirmed watchable in the
/// provider's region.
#[derive(Clone)]
pub struct AvailabilityFilter {
    provider: Arc<dyn CatalogProvider>,
}

impl AvailabilityFilter {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    /// Keep only the movies whose availability check resolves true,
    /// preserving input order among survivors.
    ///
    /// `check_availability` never fails (an unreachable upstream reads as
    /// "not available"), so one bad item can only exclude itself.
    pub async fn filter(&self, movies: Vec<CandidateMovie>) -> Vec<CandidateMovie> {
        let input_count = movies.len();

        let checks = movies.iter().map(|m| self.provider.check_availability(m.id));
        let verdicts = join_all(checks).await;

        let kept: Vec<CandidateMovie> = movies
            .into_iter()
            .zip(verdicts)
            .filter_map(|(movie, available)| available.then_some(movie))
            .collect();

        debug!(
            input = input_count,
            kept = kept.len(),
            "availability filter applied"
        );

        kept
    }
}
