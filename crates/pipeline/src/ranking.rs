//! Result ranking.
//!
//! Pure, synchronous and deterministic: no I/O, no clock, no randomness.
//! Results are ordered by how many of the user's chosen genres each movie
//! carries, with the catalog rating as tie-break.

use catalog::{CandidateMovie, GenreId};
use std::cmp::Ordering;

/// A candidate augmented with its derived match score.
///
/// The score exists only for ordering; it is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMovie {
    pub movie: CandidateMovie,
    pub genre_match_score: usize,
}

/// Count of overlap between a movie's genres and the chosen set.
///
/// With an empty chosen set every movie scores 0 and ranking degrades to
/// rating-only ordering.
pub fn genre_match_score(movie: &CandidateMovie, chosen: &[GenreId]) -> usize {
    movie
        .genre_ids
        .iter()
        .filter(|id| chosen.contains(id))
        .count()
}

/// Order candidates by a stable two-key sort:
/// 1. Descending genre match score
/// 2. Descending vote average on score ties
///
/// Full ties keep their catalog-arrival order (`Vec::sort_by` is stable).
pub fn rank(movies: Vec<CandidateMovie>, chosen: &[GenreId]) -> Vec<RankedMovie> {
    let mut ranked: Vec<RankedMovie> = movies
        .into_iter()
        .map(|movie| RankedMovie {
            genre_match_score: genre_match_score(&movie, chosen),
            movie,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.genre_match_score
            .cmp(&a.genre_match_score)
            .then_with(|| {
                b.movie
                    .vote_average
                    .partial_cmp(&a.movie.vote_average)
                    .unwrap_or(Ordering::Equal)
            })
    });

    ranked
}
