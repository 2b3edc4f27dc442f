//! Search: grouping of results by genre and the debounced input state machine.
//!
//! # Modules
//!
//! - [`aggregate`]: Order-preserving grouping of movies by genre
//! - [`debounce`]: Generic trailing-edge debouncer
//! - [`highlight`]: Fuzzy-match highlight ranges for titles
//! - [`state`]: [`SearchState`] phases from input to results

pub mod aggregate;
pub mod debounce;
pub mod highlight;
pub mod state;

pub use aggregate::{flatten, group_by_genre, GenreGroup};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use highlight::highlight_ranges;
pub use state::{SearchPhase, SearchState};
