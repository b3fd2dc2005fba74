//! Integration tests for the pipeline.
//!
//! These verify that availability filtering and ranking compose correctly
//! on a realistic result page.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use catalog::{
    CandidateMovie, CatalogError, CatalogProvider, GenreId, MovieDetails, MovieId, ProviderEntry,
    WatchProviders,
};
use pipeline::{AvailabilityFilter, ranking};

struct RegionStub {
    available: HashSet<MovieId>,
}

#[async_trait]
impl CatalogProvider for RegionStub {
    async fn search_by_criteria(
        &self,
        _genre_ids: &[GenreId],
        _max_runtime_minutes: u32,
    ) -> catalog::Result<Vec<CandidateMovie>> {
        unimplemented!("search is not part of this suite")
    }

    async fn fetch_details(&self, _movie_id: MovieId) -> catalog::Result<MovieDetails> {
        Err(CatalogError::Status { status: 404 })
    }

    async fn fetch_watch_providers(&self, movie_id: MovieId) -> WatchProviders {
        if self.available.contains(&movie_id) {
            WatchProviders {
                buy: vec![ProviderEntry {
                    provider_id: 2,
                    provider_name: "Apple TV".to_string(),
                    logo_path: None,
                }],
                ..Default::default()
            }
        } else {
            WatchProviders::default()
        }
    }
}

fn movie(id: MovieId, genre_ids: Vec<GenreId>, vote_average: f32) -> CandidateMovie {
    CandidateMovie {
        id,
        title: format!("Movie {id}"),
        poster_path: Some(format!("/poster{id}.jpg")),
        release_date: Some("2020-01-01".to_string()),
        vote_average,
        genre_ids,
        popularity: 60.0,
    }
}

#[tokio::test]
async fn test_filter_then_rank_full_page() {
    let chosen: Vec<GenreId> = vec![28, 35, 27];

    // Catalog-arrival order: popularity descending, as TMDB returns it
    let page = vec![
        movie(1, vec![35], 9.0),      // 1 match, great rating, available
        movie(2, vec![28, 27], 5.5),  // 2 matches, poor rating, available
        movie(3, vec![28, 35], 8.0),  // 2 matches, unavailable
        movie(4, vec![18], 7.5),      // 0 matches, available
        movie(5, vec![28, 27], 5.5),  // full tie with movie 2, available
    ];

    let provider = Arc::new(RegionStub {
        available: [1, 2, 4, 5].into_iter().collect(),
    });

    let available = AvailabilityFilter::new(provider).filter(page).await;
    let ranked = ranking::rank(available, &chosen);

    let order: Vec<MovieId> = ranked.iter().map(|r| r.movie.id).collect();
    // Movie 3 is gone; 2-match movies lead despite lower votes; the full
    // tie between 2 and 5 keeps arrival order.
    assert_eq!(order, vec![2, 5, 1, 4]);
    assert_eq!(ranked[0].genre_match_score, 2);
    assert_eq!(ranked[2].genre_match_score, 1);
    assert_eq!(ranked[3].genre_match_score, 0);
}

#[tokio::test]
async fn test_empty_selection_rates_only() {
    let provider = Arc::new(RegionStub {
        available: [1, 2].into_iter().collect(),
    });

    let page = vec![movie(1, vec![28], 6.0), movie(2, vec![35], 8.5)];

    let available = AvailabilityFilter::new(provider).filter(page).await;
    let ranked = ranking::rank(available, &[]);

    let order: Vec<MovieId> = ranked.iter().map(|r| r.movie.id).collect();
    assert_eq!(order, vec![2, 1]);
}
