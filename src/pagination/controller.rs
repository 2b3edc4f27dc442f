//! Incremental loader for one genre's movie list.
//!
//! ```text
//! Idle ─reset─▶ Loading ─page─▶ Loaded(has_more) ─load_more─▶ Loading ─▶ ... ─▶ Loaded(!has_more)
//! ```
//!
//! The controller never performs I/O. [`reset`](PaginationController::reset) and
//! [`load_more`](PaginationController::load_more) hand back a [`PageRequest`] for
//! the caller to execute; the outcome is fed to
//! [`apply`](PaginationController::apply). Every request carries the epoch it was
//! issued under, and a reset bumps the epoch, so answers for an abandoned genre
//! are ignored.

use crate::api::MoviePage;
use crate::domain::Movie;

/// Movies requested per page.
pub const PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Idle,
    Loading,
    Loaded,
}

/// A page fetch the caller should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub genre: String,
    pub limit: u32,
    pub offset: u32,
    pub epoch: u64,
}

#[derive(Debug, Clone)]
pub struct PaginationController {
    genre: Option<String>,
    items: Vec<Movie>,
    offset: u32,
    has_more: bool,
    total: Option<u32>,
    phase: PagePhase,
    epoch: u64,
    error: Option<String>,
    sentinel_visible: bool,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            genre: None,
            items: Vec::new(),
            offset: 0,
            has_more: true,
            total: None,
            phase: PagePhase::Idle,
            epoch: 0,
            error: None,
            sentinel_visible: false,
        }
    }

    #[must_use]
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    #[must_use]
    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Total reported by the last page, if any page has landed.
    #[must_use]
    pub const fn total(&self) -> Option<u32> {
        self.total
    }

    #[must_use]
    pub const fn phase(&self) -> PagePhase {
        self.phase
    }

    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Message from the last failed page load.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, PagePhase::Loading)
    }

    /// True once a genre finished loading with nothing in it.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.phase == PagePhase::Loaded && !self.has_more && self.items.is_empty()
    }

    /// Switches to `genre`, discarding everything, and requests the first page.
    pub fn reset(&mut self, genre: &str) -> Option<PageRequest> {
        self.epoch += 1;
        self.genre = Some(genre.to_string());
        self.items.clear();
        self.offset = 0;
        self.has_more = true;
        self.total = None;
        self.error = None;
        self.phase = PagePhase::Idle;
        tracing::debug!(genre, epoch = self.epoch, "pagination reset");
        self.load_more()
    }

    /// Requests the next page unless one is in flight or the list is complete.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.is_loading() || !self.has_more {
            return None;
        }
        let genre = self.genre.clone()?;
        self.phase = PagePhase::Loading;
        Some(PageRequest {
            genre,
            limit: PAGE_SIZE,
            offset: self.offset,
            epoch: self.epoch,
        })
    }

    /// Feeds the outcome of `request` back in.
    ///
    /// Returns a follow-up request when the sentinel is still visible and more
    /// pages remain.
    pub fn apply(
        &mut self,
        request: &PageRequest,
        outcome: Result<MoviePage, String>,
    ) -> Option<PageRequest> {
        if request.epoch != self.epoch || self.genre.as_deref() != Some(request.genre.as_str()) {
            tracing::debug!(
                genre = %request.genre,
                epoch = request.epoch,
                current = self.epoch,
                "discarding page from previous epoch"
            );
            return None;
        }
        if !self.is_loading() || request.offset != self.offset {
            return None;
        }

        match outcome {
            Ok(page) => {
                self.items.extend(page.movies);
                self.offset += PAGE_SIZE;
                self.has_more = page.has_more;
                self.total = Some(page.total);
                self.error = None;
                self.phase = PagePhase::Loaded;
                tracing::debug!(
                    genre = %request.genre,
                    loaded = self.items.len(),
                    has_more = self.has_more,
                    "page applied"
                );
            }
            Err(message) => {
                tracing::warn!(genre = %request.genre, offset = request.offset, error = %message, "page load failed");
                self.error = Some(message);
                self.phase = if self.items.is_empty() && self.total.is_none() {
                    PagePhase::Idle
                } else {
                    PagePhase::Loaded
                };
                return None;
            }
        }

        if self.sentinel_visible {
            self.load_more()
        } else {
            None
        }
    }

    /// Records sentinel visibility; becoming visible triggers the next page.
    pub fn on_visibility(&mut self, visible: bool) -> Option<PageRequest> {
        let was_visible = self.sentinel_visible;
        self.sentinel_visible = visible;
        if visible && !was_visible {
            self.load_more()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn movies(range: std::ops::Range<i64>) -> Vec<Movie> {
        range
            .map(|id| Movie {
                id,
                title: format!("Movie {id}"),
                director: "Someone".to_string(),
                director_id: None,
                release_year: 2010,
                genre: Some("Drama".to_string()),
                rating: None,
                description: None,
                language: None,
                image_url: None,
                created_at: Utc::now(),
                cast: None,
                reviews: None,
            })
            .collect()
    }

    fn page(range: std::ops::Range<i64>, total: u32, has_more: bool) -> MoviePage {
        let movies = movies(range);
        MoviePage {
            count: u32::try_from(movies.len()).unwrap_or(0),
            movies,
            total,
            has_more,
        }
    }

    #[test]
    fn two_pages_cover_twenty_five_movies() {
        let mut pager = PaginationController::new();
        let first = pager.reset("Drama").expect("first page");
        assert_eq!((first.offset, first.limit), (0, PAGE_SIZE));
        assert!(pager.load_more().is_none(), "no overlap while loading");

        assert!(pager.apply(&first, Ok(page(0..20, 25, true))).is_none());
        let second = pager.load_more().expect("second page");
        assert_eq!(second.offset, 20);

        pager.apply(&second, Ok(page(20..25, 25, false)));
        assert_eq!(pager.items().len(), 25);
        assert!(!pager.has_more());
        assert!(pager.load_more().is_none());
    }

    #[test]
    fn pages_from_a_previous_genre_are_ignored() {
        let mut pager = PaginationController::new();
        let drama = pager.reset("Drama").expect("drama page");
        let comedy = pager.reset("Comedy").expect("comedy page");

        assert!(pager.apply(&drama, Ok(page(0..20, 40, true))).is_none());
        assert!(pager.items().is_empty());
        assert!(pager.is_loading());

        pager.apply(&comedy, Ok(page(100..103, 3, false)));
        assert_eq!(pager.items().len(), 3);
        assert_eq!(pager.genre(), Some("Comedy"));
    }

    #[test]
    fn failed_page_keeps_items_and_allows_retry() {
        let mut pager = PaginationController::new();
        let first = pager.reset("Drama").expect("first page");
        pager.apply(&first, Ok(page(0..20, 30, true)));

        let second = pager.load_more().expect("second page");
        pager.apply(&second, Err("timeout".to_string()));
        assert_eq!(pager.phase(), PagePhase::Loaded);
        assert_eq!(pager.error(), Some("timeout"));
        assert!(pager.has_more());
        assert_eq!(pager.items().len(), 20);

        let retry = pager.load_more().expect("retry");
        assert_eq!(retry.offset, 20);
    }

    #[test]
    fn first_page_failure_returns_to_idle() {
        let mut pager = PaginationController::new();
        let first = pager.reset("Drama").expect("first page");
        pager.apply(&first, Err("down".to_string()));
        assert_eq!(pager.phase(), PagePhase::Idle);
        assert!(pager.load_more().is_some());
    }

    #[test]
    fn visible_sentinel_chains_next_page() {
        let mut pager = PaginationController::new();
        let first = pager.reset("Drama").expect("first page");
        assert!(pager.on_visibility(true).is_none(), "already loading");

        let next = pager
            .apply(&first, Ok(page(0..20, 45, true)))
            .expect("chained page");
        assert_eq!(next.offset, 20);

        pager.on_visibility(false);
        assert!(pager.apply(&next, Ok(page(20..40, 45, true))).is_none());
        let third = pager.on_visibility(true).expect("visible again");
        assert_eq!(third.offset, 40);
    }

    #[test]
    fn empty_genre_is_a_loaded_empty_list() {
        let mut pager = PaginationController::new();
        let first = pager.reset("Western").expect("first page");
        pager.apply(&first, Ok(page(0..0, 0, false)));
        assert!(pager.is_empty_result());
    }
}
