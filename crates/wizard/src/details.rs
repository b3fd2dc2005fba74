//! On-demand loading of one movie's details and watch offers.
//!
//! Independent of the wizard's phase state: the user can open a result
//! card at any time once results are showing.

use std::sync::{Arc, Mutex};

use tracing::warn;

use catalog::{CatalogProvider, MovieDetails, MovieId, Result, WatchProviders};

/// The movie currently presented in the details view, with its
/// region-scoped offers. Held only while the view is open.
#[derive(Debug, Clone)]
pub struct ActiveSelection {
    pub details: MovieDetails,
    pub providers: WatchProviders,
}

/// Loads and holds the active selection for the details overlay.
#[derive(Clone)]
pub struct DetailsLoader {
    provider: Arc<dyn CatalogProvider>,
    active: Arc<Mutex<Option<ActiveSelection>>>,
}

impl DetailsLoader {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Fetch details and watch offers concurrently and publish them as the
    /// active selection. If the detail fetch fails the view stays closed;
    /// there is no partially populated state. (Offer lookups cannot fail,
    /// they degrade to "no offers".)
    pub async fn open(&self, movie_id: MovieId) -> Result<()> {
        let (details, providers) = tokio::join!(
            self.provider.fetch_details(movie_id),
            self.provider.fetch_watch_providers(movie_id),
        );

        match details {
            Ok(details) => {
                *self.active.lock().unwrap() = Some(ActiveSelection { details, providers });
                Ok(())
            }
            Err(e) => {
                warn!(movie_id, error = %e, "detail fetch failed, leaving details view closed");
                Err(e)
            }
        }
    }

    /// Discard the active selection.
    pub fn close(&self) {
        *self.active.lock().unwrap() = None;
    }

    pub fn active(&self) -> Option<ActiveSelection> {
        self.active.lock().unwrap().clone()
    }
}
