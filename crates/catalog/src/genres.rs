//! Static genre catalog.
//!
//! The 19 TMDB movie genres with their French display labels, fixed at
//! process start and read-only. The selection wizard consumes these as
//! swipe cards, back to front.

use crate::types::{Genre, GenreId};
use std::sync::OnceLock;

const GENRE_TABLE: [(GenreId, &str); 19] = [
    (28, "Action"),
    (12, "Aventure"),
    (16, "Animation"),
    (35, "Comédie"),
    (80, "Crime"),
    (99, "Documentaire"),
    (18, "Drame"),
    (10751, "Famille"),
    (14, "Fantastique"),
    (36, "Histoire"),
    (27, "Horreur"),
    (10402, "Musique"),
    (9648, "Mystère"),
    (10749, "Romance"),
    (878, "Science-Fiction"),
    (10770, "Téléfilm"),
    (53, "Thriller"),
    (10752, "Guerre"),
    (37, "Western"),
];

/// The full genre catalog, in presentation order.
pub fn genre_catalog() -> &'static [Genre] {
    static CATALOG: OnceLock<Vec<Genre>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        GENRE_TABLE
            .iter()
            .map(|&(id, name)| Genre {
                id,
                name: name.to_string(),
            })
            .collect()
    })
}

/// Display label for a genre id, if it is one we know about.
pub fn genre_label(id: GenreId) -> Option<&'static str> {
    genre_catalog()
        .iter()
        .find(|g| g.id == id)
        .map(|g| g.name.as_str())
}
