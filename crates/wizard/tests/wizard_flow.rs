//! End-to-end tests for a full wizard run against an in-process catalog.
//!
//! These exercise the complete flow the presentation layer would drive:
//! swipes, duration, search, details, reset.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use catalog::{
    CandidateMovie, CatalogError, CatalogProvider, Genre, GenreId, MovieDetails, MovieId,
    ProviderEntry, WatchProviders,
};
use wizard::{DetailsLoader, Phase, SearchStatus, SelectionWizard, SwipeDirection};

struct ScriptedCatalog {
    page: Vec<CandidateMovie>,
    unavailable: HashSet<MovieId>,
    search_calls: AtomicUsize,
}

#[async_trait]
impl CatalogProvider for ScriptedCatalog {
    async fn search_by_criteria(
        &self,
        genre_ids: &[GenreId],
        max_runtime_minutes: u32,
    ) -> catalog::Result<Vec<CandidateMovie>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        // The wizard must forward exactly the user's criteria
        assert_eq!(genre_ids, &[27, 35, 28]);
        assert_eq!(max_runtime_minutes, 90);
        Ok(self.page.clone())
    }

    async fn fetch_details(&self, movie_id: MovieId) -> catalog::Result<MovieDetails> {
        self.page
            .iter()
            .find(|m| m.id == movie_id)
            .map(|m| MovieDetails {
                id: m.id,
                title: m.title.clone(),
                poster_path: m.poster_path.clone(),
                release_date: m.release_date.clone(),
                vote_average: m.vote_average,
                overview: String::new(),
                runtime: Some(88),
                genres: Vec::new(),
            })
            .ok_or(CatalogError::Status { status: 404 })
    }

    async fn fetch_watch_providers(&self, movie_id: MovieId) -> WatchProviders {
        if self.unavailable.contains(&movie_id) {
            WatchProviders::default()
        } else {
            WatchProviders {
                flatrate: vec![ProviderEntry {
                    provider_id: 8,
                    provider_name: "Netflix".to_string(),
                    logo_path: None,
                }],
                ..Default::default()
            }
        }
    }
}

fn movie(id: MovieId, genre_ids: Vec<GenreId>, vote_average: f32) -> CandidateMovie {
    CandidateMovie {
        id,
        title: format!("Movie {id}"),
        poster_path: Some(format!("/p{id}.jpg")),
        release_date: Some("2019-06-01".to_string()),
        vote_average,
        genre_ids,
        popularity: 55.0,
    }
}

fn scripted_page() -> Vec<CandidateMovie> {
    vec![
        movie(1, vec![28, 27], 6.1),  // 2 matches
        movie(2, vec![35], 9.2),      // 1 match, best rating
        movie(3, vec![35, 27], 7.0),  // 2 matches but unavailable
        movie(4, vec![35], 7.5),      // 1 match
    ]
}

/// Replay the user's gestures: accept Horreur, Comédie, Action (the deck
/// runs back to front), decline the rest.
fn drive_genre_phase(wizard: &SelectionWizard) {
    let targets = [28, 35, 27];
    while wizard.phase() == Phase::PickingGenres {
        let Some(genre) = wizard.current_genre() else {
            break;
        };
        let direction = if targets.contains(&genre.id) {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };
        wizard.submit_genre_swipe(direction);
    }
}

#[tokio::test]
async fn test_complete_wizard_run() {
    let provider = Arc::new(ScriptedCatalog {
        page: scripted_page(),
        unavailable: [3].into_iter().collect(),
        search_calls: AtomicUsize::new(0),
    });
    let wizard = SelectionWizard::new(provider.clone());

    drive_genre_phase(&wizard);
    assert_eq!(wizard.phase(), Phase::PickingDuration);
    assert_eq!(wizard.chosen_genre_ids(), vec![27, 35, 28]);

    wizard.set_duration(90);
    let job = wizard.confirm_duration().expect("search armed");
    assert_eq!(wizard.phase(), Phase::ShowingResults);
    assert!(wizard.is_loading());

    wizard.run_search(job).await;

    assert_eq!(wizard.search_status(), Some(SearchStatus::Succeeded));
    assert_eq!(provider.search_calls.load(Ordering::SeqCst), 1);

    // Movie 3 is filtered out as unavailable; movie 1 leads on match
    // count despite the lowest rating; rating breaks the 1-match tie.
    let order: Vec<MovieId> = wizard.results().iter().map(|r| r.movie.id).collect();
    assert_eq!(order, vec![1, 2, 4]);
    assert_eq!(wizard.results()[0].genre_match_score, 2);
}

#[tokio::test]
async fn test_details_flow_is_independent_of_wizard_phase() {
    let provider = Arc::new(ScriptedCatalog {
        page: scripted_page(),
        unavailable: HashSet::new(),
        search_calls: AtomicUsize::new(0),
    });
    let loader = DetailsLoader::new(provider);

    // Opening details does not require any wizard progress
    loader.open(2).await.unwrap();
    let active = loader.active().unwrap();
    assert_eq!(active.details.title, "Movie 2");
    assert!(active.providers.has_any_offer());

    loader.close();
    assert!(loader.active().is_none());

    // Unknown id: the view stays closed
    assert!(loader.open(999).await.is_err());
    assert!(loader.active().is_none());
}

#[tokio::test]
async fn test_reset_starts_a_clean_run() {
    let provider = Arc::new(ScriptedCatalog {
        page: scripted_page(),
        unavailable: HashSet::new(),
        search_calls: AtomicUsize::new(0),
    });
    let wizard = SelectionWizard::new(provider);

    drive_genre_phase(&wizard);
    wizard.set_duration(90);
    let job = wizard.confirm_duration().unwrap();
    wizard.run_search(job).await;
    assert!(!wizard.results().is_empty());

    wizard.reset();

    assert_eq!(wizard.phase(), Phase::PickingGenres);
    assert!(wizard.chosen_genre_ids().is_empty());
    assert!(wizard.results().is_empty());
    assert_eq!(wizard.search_status(), None);
    // Deck pointer is back at the last catalog card
    assert_eq!(wizard.current_genre().map(|g| g.id), Some(37));
}

#[tokio::test]
async fn test_custom_deck_three_accepts() {
    let deck = vec![
        Genre { id: 28, name: "Action".to_string() },
        Genre { id: 35, name: "Comédie".to_string() },
        Genre { id: 27, name: "Horreur".to_string() },
    ];
    let provider = Arc::new(ScriptedCatalog {
        page: scripted_page(),
        unavailable: HashSet::new(),
        search_calls: AtomicUsize::new(0),
    });
    let wizard = SelectionWizard::with_deck(provider, deck);

    for _ in 0..3 {
        wizard.submit_genre_swipe(SwipeDirection::Right);
    }

    assert_eq!(wizard.phase(), Phase::PickingDuration);
    assert_eq!(wizard.chosen_genre_ids(), vec![27, 35, 28]);
}
