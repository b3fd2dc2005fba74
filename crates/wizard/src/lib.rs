//! # Selection Wizard
//!
//! This crate coordinates the whole recommendation flow:
//! 1. Collect up to 3 genres through accept/decline swipes
//! 2. Collect a maximum acceptable runtime
//! 3. Fetch candidates from the catalog, narrow them to the watchable
//!    ones, rank them, and publish the ordered list
//! 4. On selection, load one movie's details and watch offers
//!
//! The wizard is the only owner of the selection state; the presentation
//! layer drives it through the operations on [`SelectionWizard`] and reads
//! snapshots back. Searches are armed exactly once per transition into the
//! ready condition and are guarded by a generation counter, so a `reset()`
//! while a fetch is in flight strands the late result instead of applying
//! it to state that has moved on.

pub mod details;
pub mod state;
pub mod wizard;

// Re-export main types
pub use details::{ActiveSelection, DetailsLoader};
pub use state::{Phase, SearchStatus, SwipeDirection, WizardError};
pub use wizard::{SearchJob, SelectionWizard};
