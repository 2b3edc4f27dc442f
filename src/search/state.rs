//! Debounced search state machine.
//!
//! ```text
//! Idle ──input──▶ Pending ──quiet 300ms──▶ Searching ──▶ Results | NoResults | Failed
//!   ▲                │                         │
//!   └──── clear ─────┴──────── clear ──────────┘
//! ```
//!
//! Each edit restarts the quiet period. A blank term returns to `Idle` at once
//! and never produces a request. Responses are matched against the current term;
//! anything else is dropped.

use super::aggregate::{group_by_genre, GenreGroup};
use super::debounce::Debouncer;
use crate::domain::Movie;
use std::time::{Duration, Instant};

/// Where the search currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPhase {
    /// Nothing searched yet, or the input was cleared.
    Idle,
    /// Waiting out the debounce window.
    Pending,
    /// Request issued, no answer yet.
    Searching,
    /// Matches grouped by genre.
    Results(Vec<GenreGroup>),
    /// The backend found nothing for the term.
    NoResults,
    /// The request failed; carries a displayable message.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SearchState {
    input: String,
    phase: SearchPhase,
    debouncer: Debouncer<String>,
}

impl SearchState {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            input: String::new(),
            phase: SearchPhase::Idle,
            debouncer: Debouncer::new(window),
        }
    }

    /// Raw text as typed.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The term a request would be issued for.
    #[must_use]
    pub fn term(&self) -> &str {
        self.input.trim()
    }

    #[must_use]
    pub const fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// When the pending term becomes due, if one is pending.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Whether the user has an active (non-blank) search.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.term().is_empty()
    }

    /// Records an edit of the search box at `now`.
    pub fn set_input(&mut self, text: &str, now: Instant) {
        let previous = self.term().to_string();
        self.input = text.to_string();

        if self.term().is_empty() {
            self.clear();
            return;
        }
        if self.term() == previous && self.phase != SearchPhase::Idle {
            return;
        }

        self.debouncer.push(self.term().to_string(), now);
        self.phase = SearchPhase::Pending;
    }

    /// Returns the term to search for once the debounce window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let term = self.debouncer.poll(now)?;
        if term != self.term() {
            return None;
        }
        self.phase = SearchPhase::Searching;
        tracing::debug!(term = %term, "search debounce elapsed");
        Some(term)
    }

    /// Applies a response for `term`. Returns false when it was discarded.
    ///
    /// Settled phases accept a response for the same term, which is how a refresh
    /// after a write lands.
    pub fn apply(&mut self, term: &str, outcome: Result<Vec<Movie>, String>) -> bool {
        if term != self.term() || matches!(self.phase, SearchPhase::Idle | SearchPhase::Pending) {
            tracing::debug!(term = %term, current = %self.term(), "discarding stale search response");
            return false;
        }

        self.phase = match outcome {
            Ok(movies) if movies.is_empty() => SearchPhase::NoResults,
            Ok(movies) => SearchPhase::Results(group_by_genre(movies)),
            Err(message) => SearchPhase::Failed(message),
        };
        true
    }

    /// Empties the input and results immediately, cancelling any pending search.
    pub fn clear(&mut self) {
        self.input.clear();
        self.debouncer.cancel();
        self.phase = SearchPhase::Idle;
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(super::debounce::DEFAULT_DEBOUNCE)
    }
}
