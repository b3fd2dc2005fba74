//! The selection wizard: genre pick → duration pick → ranked results.
//!
//! ## Control flow
//! Transition operations mutate the state container synchronously; the
//! one that completes the ready condition (`confirm_duration`) hands back
//! a [`SearchJob`] exactly once. The caller then drives
//! [`SelectionWizard::run_search`], which performs
//! fetch → availability filter → rank and publishes the ordered result.
//!
//! ## Staleness
//! Every job carries the generation it was armed under. `reset()` bumps
//! the generation, so a search that was in flight when the user started
//! over publishes into the void instead of resurrecting dead state. While
//! a search is loading (or has settled), no second job can be armed until
//! the next reset.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::{debug, info, warn};

use catalog::{CatalogProvider, Genre, GenreId, genre_catalog};
use pipeline::{AvailabilityFilter, RankedMovie, ranking};

use crate::state::{
    DEFAULT_DURATION_MINUTES, DURATION_MAX_MINUTES, DURATION_MIN_MINUTES, DURATION_STEP_MINUTES,
    MAX_CHOSEN_GENRES, Phase, SearchStatus, SwipeDirection, WizardError,
};

/// A one-shot search trigger, armed on the transition into the ready
/// condition. Consumed by [`SelectionWizard::run_search`].
#[derive(Debug)]
pub struct SearchJob {
    generation: u64,
    genre_ids: Vec<GenreId>,
    max_runtime_minutes: u32,
}

impl SearchJob {
    pub fn genre_ids(&self) -> &[GenreId] {
        &self.genre_ids
    }

    pub fn max_runtime_minutes(&self) -> u32 {
        self.max_runtime_minutes
    }
}

struct WizardState {
    chosen_genre_ids: Vec<GenreId>,
    /// Index of the genre card currently on screen; cards are consumed
    /// back to front. `None` once the deck is exhausted.
    genre_cursor: Option<usize>,
    genre_phase_done: bool,
    duration_minutes: u32,
    duration_phase_done: bool,
    /// Bumped on every reset; in-flight searches from older generations
    /// publish into the void.
    generation: u64,
    status: Option<SearchStatus>,
    results: Vec<RankedMovie>,
}

impl WizardState {
    fn fresh(deck_len: usize, generation: u64) -> Self {
        Self {
            chosen_genre_ids: Vec::new(),
            genre_cursor: deck_len.checked_sub(1),
            genre_phase_done: false,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            duration_phase_done: false,
            generation,
            status: None,
            results: Vec::new(),
        }
    }
}

/// Finite-state controller for one recommendation run.
///
/// Cheap to clone; all clones share the same state container. Only the
/// wizard mutates it.
#[derive(Clone)]
pub struct SelectionWizard {
    provider: Arc<dyn CatalogProvider>,
    availability: AvailabilityFilter,
    deck: Arc<Vec<Genre>>,
    state: Arc<Mutex<WizardState>>,
}

impl SelectionWizard {
    /// Create a wizard over the static genre catalog.
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self::with_deck(provider, genre_catalog().to_vec())
    }

    /// Create a wizard over a custom genre deck (reduced decks, tests).
    pub fn with_deck(provider: Arc<dyn CatalogProvider>, deck: Vec<Genre>) -> Self {
        let state = WizardState::fresh(deck.len(), 0);
        Self {
            availability: AvailabilityFilter::new(provider.clone()),
            provider,
            deck: Arc::new(deck),
            state: Arc::new(Mutex::new(state)),
        }
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        let s = self.state.lock().unwrap();
        if !s.genre_phase_done {
            Phase::PickingGenres
        } else if !s.duration_phase_done {
            Phase::PickingDuration
        } else {
            Phase::ShowingResults
        }
    }

    /// The genre card currently offered, if the deck is not exhausted.
    pub fn current_genre(&self) -> Option<Genre> {
        let s = self.state.lock().unwrap();
        s.genre_cursor.map(|i| self.deck[i].clone())
    }

    /// Accepted genres, in acceptance order.
    pub fn chosen_genre_ids(&self) -> Vec<GenreId> {
        self.state.lock().unwrap().chosen_genre_ids.clone()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.state.lock().unwrap().duration_minutes
    }

    pub fn search_status(&self) -> Option<SearchStatus> {
        self.state.lock().unwrap().status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.search_status(), Some(SearchStatus::Loading))
    }

    /// The currently published ranked results. A failed search leaves the
    /// previously published list untouched.
    pub fn results(&self) -> Vec<RankedMovie> {
        self.state.lock().unwrap().results.clone()
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Record a swipe on the current genre card.
    ///
    /// The card leaves the screen whatever the direction; `Right` also
    /// appends the genre when fewer than [`MAX_CHOSEN_GENRES`] are chosen.
    /// The third accept completes the genre phase automatically.
    pub fn submit_genre_swipe(&self, direction: SwipeDirection) {
        let mut s = self.state.lock().unwrap();
        if s.genre_phase_done {
            return;
        }
        let Some(cursor) = s.genre_cursor else {
            // Deck exhausted; only finish_genre_phase_early or reset apply
            return;
        };

        if direction == SwipeDirection::Right && s.chosen_genre_ids.len() < MAX_CHOSEN_GENRES {
            let genre = &self.deck[cursor];
            s.chosen_genre_ids.push(genre.id);
            debug!(genre = %genre.name, chosen = s.chosen_genre_ids.len(), "genre accepted");
        }

        s.genre_cursor = cursor.checked_sub(1);

        if s.chosen_genre_ids.len() == MAX_CHOSEN_GENRES {
            s.genre_phase_done = true;
            info!(chosen = ?s.chosen_genre_ids, "genre phase complete");
        }
    }

    /// End the genre phase before 3 accepts. Requires at least one chosen
    /// genre; this precondition is the wizard's, not the UI's.
    pub fn finish_genre_phase_early(&self) -> Result<(), WizardError> {
        let mut s = self.state.lock().unwrap();
        if s.chosen_genre_ids.is_empty() {
            return Err(WizardError::EmptySelection);
        }
        s.genre_phase_done = true;
        info!(chosen = ?s.chosen_genre_ids, "genre phase finished early");
        Ok(())
    }

    /// Set the maximum acceptable runtime, clamped to
    /// [[`DURATION_MIN_MINUTES`], [`DURATION_MAX_MINUTES`]] and snapped to
    /// the 10-minute step.
    pub fn set_duration(&self, minutes: u32) {
        let mut s = self.state.lock().unwrap();
        s.duration_minutes = snap_duration(minutes);
    }

    /// Confirm the runtime choice. On the transition that completes the
    /// ready condition this arms the search exactly once; re-entrant
    /// confirmations while a search is loading (or settled) arm nothing.
    pub fn confirm_duration(&self) -> Option<SearchJob> {
        let mut s = self.state.lock().unwrap();
        if !s.genre_phase_done {
            // The wizard is linear; the duration control does not exist
            // before the genre phase ends.
            return None;
        }
        if s.duration_minutes == 0 {
            return None;
        }
        s.duration_phase_done = true;
        Self::try_arm(&mut s)
    }

    /// Clear every selection and result, return to the genre phase with
    /// the deck pointer back at the last card, and strand any in-flight
    /// search.
    pub fn reset(&self) {
        let mut s = self.state.lock().unwrap();
        let generation = s.generation + 1;
        *s = WizardState::fresh(self.deck.len(), generation);
        info!(generation, "wizard reset");
    }

    fn try_arm(s: &mut WizardState) -> Option<SearchJob> {
        let ready =
            (!s.chosen_genre_ids.is_empty() || s.genre_phase_done) && s.duration_phase_done;
        if !ready || s.status.is_some() {
            return None;
        }
        s.status = Some(SearchStatus::Loading);
        Some(SearchJob {
            generation: s.generation,
            genre_ids: s.chosen_genre_ids.clone(),
            max_runtime_minutes: s.duration_minutes,
        })
    }

    // ------------------------------------------------------------------
    // Search execution
    // ------------------------------------------------------------------

    /// Run one armed search cycle: fetch candidates, keep the watchable
    /// ones, rank, publish. A stale job (reset happened meanwhile) is
    /// discarded at publish time; a failed fetch publishes `Failed` and
    /// leaves the previous results alone.
    pub async fn run_search(&self, job: SearchJob) {
        let started = Instant::now();
        info!(
            genres = ?job.genre_ids,
            max_runtime = job.max_runtime_minutes,
            "starting search cycle"
        );

        let outcome = match self
            .provider
            .search_by_criteria(&job.genre_ids, job.max_runtime_minutes)
            .await
        {
            Ok(candidates) => {
                info!(candidates = candidates.len(), "fetched candidate page");
                let available = self.availability.filter(candidates).await;
                info!(available = available.len(), "narrowed to watchable movies");
                Ok(ranking::rank(available, &job.genre_ids))
            }
            Err(e) => {
                warn!(error = %e, "search failed, keeping previous results");
                Err(())
            }
        };

        self.publish(job.generation, outcome);
        info!(elapsed = ?started.elapsed(), "search cycle finished");
    }

    fn publish(&self, generation: u64, outcome: Result<Vec<RankedMovie>, ()>) {
        let mut s = self.state.lock().unwrap();
        if s.generation != generation {
            info!(generation, current = s.generation, "discarding stale search result");
            return;
        }
        match outcome {
            Ok(ranked) => {
                info!(results = ranked.len(), "publishing ranked results");
                s.results = ranked;
                s.status = Some(SearchStatus::Succeeded);
            }
            Err(()) => {
                s.status = Some(SearchStatus::Failed);
            }
        }
    }
}

fn snap_duration(minutes: u32) -> u32 {
    let clamped = minutes.clamp(DURATION_MIN_MINUTES, DURATION_MAX_MINUTES);
    let snapped =
        ((clamped + DURATION_STEP_MINUTES / 2) / DURATION_STEP_MINUTES) * DURATION_STEP_MINUTES;
    snapped.clamp(DURATION_MIN_MINUTES, DURATION_MAX_MINUTES)
}
