//! Wizard phases, gestures and outcome states.

use thiserror::Error;

/// Maximum number of genres a user can accept
pub const MAX_CHOSEN_GENRES: usize = 3;

/// Runtime slider bounds and step, in minutes
pub const DURATION_MIN_MINUTES: u32 = 10;
pub const DURATION_MAX_MINUTES: u32 = 300;
pub const DURATION_STEP_MINUTES: u32 = 10;
pub const DEFAULT_DURATION_MINUTES: u32 = 120;

/// The wizard's visible stage, derived from the two phase-done flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PickingGenres,
    PickingDuration,
    ShowingResults,
}

/// A swipe gesture on the current genre card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Decline the genre
    Left,
    /// Accept the genre
    Right,
}

/// Where the current search stands.
///
/// `Failed` is kept distinct from an empty `Succeeded` result set: the
/// presentation layer may render both as "no movies found", but the state
/// machine does not conflate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Loading,
    Succeeded,
    Failed,
}

/// Rejected wizard operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardError {
    /// Finishing the genre phase early requires at least one chosen genre
    #[error("cannot finish the genre phase with no genre chosen")]
    EmptySelection,
}
