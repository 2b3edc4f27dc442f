//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for what the user sees. It is
//! mutated only by [`handle_event`](super::handle_event) and turned into a
//! [`ViewModel`] on demand.
//!
//! # State Components
//!
//! - **View**: which page is displayed
//! - **Context**: admin flag, form and delete-confirmation state
//! - **Search**: debounced search overlay on the home page
//! - **Pager**: infinite-scroll state of the genre page, with the sentinel
//!   geometry needed to decide visibility
//! - **Loaded data**: one slot per page, `None` while loading
//!
//! # Example
//!
//! ```rust
//! use marquee::app::AppState;
//! use std::time::Duration;
//!
//! let state = AppState::new(10, Duration::from_millis(300), true);
//! let vm = state.compute_viewmodel();
//! assert_eq!(vm.header.title, "Marquee");
//! ```

use super::context::MovieContext;
use super::modes::View;
use crate::api::MovieQuery;
use crate::domain::{Actor, Category, Director, Genre, Movie, Review};
use crate::pagination::{GridLayout, PaginationController, SentinelObserver, Span};
use crate::search::{highlight_ranges, SearchPhase, SearchState};
use crate::ui::carousel::CarouselScroll;
use crate::ui::viewmodel::{
    Body, CarouselRow, CastLine, ConfirmView, FormView, GridView, HeaderInfo, ListItem, ListView,
    MovieCard, MovieDetailView, PersonView, ReviewLine, SearchGroup, SearchView, ViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashMap;
use std::time::Duration;

/// Movies sampled per genre on the home page.
pub const DEFAULT_LIMIT_PER_GENRE: u32 = 10;

/// Width of a home-page carousel viewport, in pixels.
pub const DEFAULT_CAROUSEL_WIDTH: f64 = 1280.0;

/// Failure of the current page's read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub message: String,
    pub not_found: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,

    /// Shared UI flags passed to every component.
    pub context: MovieContext,

    pub search: SearchState,

    /// Genre page pagination. Reset whenever the genre page is (re)entered.
    pub pager: PaginationController,

    pub observer: SentinelObserver,
    pub layout: GridLayout,

    /// Last reported scroll viewport of the genre page.
    pub viewport: Option<Span>,

    /// Filters for the home listing. `limit_per_genre` is always set.
    pub home_query: MovieQuery,

    pub categories: Option<Vec<Category>>,

    /// Scroll position per home carousel, keyed by genre name.
    pub carousels: HashMap<String, CarouselScroll>,
    pub carousel_width: f64,

    pub movie: Option<Movie>,
    pub reviews: Option<Vec<Review>>,
    pub actor: Option<Actor>,
    pub director: Option<Director>,
    pub actors: Option<Vec<Actor>>,
    pub directors: Option<Vec<Director>>,
    pub genres: Option<Vec<Genre>>,

    pub load_error: Option<LoadError>,

    /// Outcome line of the last write.
    pub notice: Option<String>,

    /// Inline error under the review form.
    pub review_error: Option<String>,

    /// Why the review list of the open movie couldn't be loaded.
    pub reviews_error: Option<String>,
}

impl AppState {
    #[must_use]
    pub fn new(limit_per_genre: u32, debounce: Duration, is_admin: bool) -> Self {
        Self {
            view: View::Home,
            context: MovieContext::new(is_admin),
            search: SearchState::new(debounce),
            pager: PaginationController::new(),
            observer: SentinelObserver::default(),
            layout: GridLayout::default(),
            viewport: None,
            home_query: MovieQuery::home(limit_per_genre),
            categories: None,
            carousels: HashMap::new(),
            carousel_width: DEFAULT_CAROUSEL_WIDTH,
            movie: None,
            reviews: None,
            actor: None,
            director: None,
            actors: None,
            directors: None,
            genres: None,
            load_error: None,
            notice: None,
            review_error: None,
            reviews_error: None,
        }
    }

    #[must_use]
    pub const fn limit_per_genre(&self) -> u32 {
        match self.home_query.limit_per_genre {
            Some(limit) => limit,
            None => DEFAULT_LIMIT_PER_GENRE,
        }
    }

    /// Replaces the home filters, keeping the configured per-genre limit when
    /// `query` does not set one.
    pub fn set_home_filters(&mut self, mut query: MovieQuery) {
        if query.limit_per_genre.is_none() {
            query.limit_per_genre = Some(self.limit_per_genre());
        }
        self.home_query = query;
    }

    /// Whether the sentinel would be visible with `items` cards laid out.
    #[must_use]
    pub fn sentinel_visible(&self, items: usize) -> bool {
        self.viewport.is_some_and(|viewport| {
            self.observer
                .is_visible(self.layout.sentinel_span(items), viewport)
        })
    }

    /// Stores the home categories and sizes a carousel for each, keeping the
    /// scroll position of rows that were already there.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        let mut carousels = HashMap::new();
        for category in categories.iter().filter(|c| !c.is_empty()) {
            let mut row = CarouselScroll::for_cards(category.movies.len(), self.carousel_width);
            if let Some(previous) = self.carousels.get(&category.genre_name) {
                row.set_offset(previous.offset());
            }
            carousels.insert(category.genre_name.clone(), row);
        }
        self.carousels = carousels;
        self.categories = Some(categories);
    }

    /// Forgets everything loaded for detail and list pages.
    pub fn clear_page_data(&mut self) {
        self.movie = None;
        self.reviews = None;
        self.actor = None;
        self.director = None;
        self.actors = None;
        self.directors = None;
        self.genres = None;
        self.load_error = None;
        self.review_error = None;
        self.reviews_error = None;
    }

    /// Computes the view model for the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", view = ?self.view).entered();

        let body = self.load_error.as_ref().map_or_else(
            || self.compute_body(),
            |error| Body::Failed {
                message: if error.not_found {
                    format!("{} not found", self.view.title())
                } else {
                    error.message.clone()
                },
                not_found: error.not_found,
            },
        );

        ViewModel {
            header: HeaderInfo {
                title: self.view.title(),
                admin: self.context.is_admin(),
                search: (self.view == View::Home).then(|| self.search.input().to_string()),
            },
            notice: self.notice.clone(),
            body,
            form: self.compute_form(),
            confirm_delete: self.compute_confirm(),
        }
    }

    fn compute_body(&self) -> Body {
        match &self.view {
            View::Home if self.search.is_active() => Body::Search(self.compute_search()),
            View::Home => self.compute_home(),
            View::Genre(genre) => Body::Grid(self.compute_grid(genre)),
            View::Movie(_) => self.movie.as_ref().map_or_else(
                || Body::Loading("Loading...".to_string()),
                |movie| Body::Movie(Box::new(self.compute_movie(movie))),
            ),
            View::Actor(_) => self.actor.as_ref().map_or_else(
                || Body::Loading("Loading...".to_string()),
                |actor| {
                    Body::Person(self.compute_person(
                        &actor.name,
                        actor.bio.as_deref(),
                        actor.birth_year,
                        actor.movies.as_deref(),
                    ))
                },
            ),
            View::Director(_) => self.director.as_ref().map_or_else(
                || Body::Loading("Loading...".to_string()),
                |director| {
                    Body::Person(self.compute_person(
                        &director.name,
                        director.bio.as_deref(),
                        director.birth_year,
                        director.movies.as_deref(),
                    ))
                },
            ),
            View::Actors => Self::compute_list(self.actors.as_ref(), "No actors found.", |actor| {
                ListItem {
                    id: actor.id,
                    name: actor.name.clone(),
                    detail: actor.movie_count.map(|n| format!("{n} movies")),
                }
            }),
            View::Directors => {
                Self::compute_list(self.directors.as_ref(), "No directors found.", |director| {
                    ListItem {
                        id: director.id,
                        name: director.name.clone(),
                        detail: director.movie_count.map(|n| format!("{n} movies")),
                    }
                })
            }
            View::Genres => Self::compute_list(self.genres.as_ref(), "No genres found.", |genre| {
                ListItem {
                    id: genre.id,
                    name: genre.name.clone(),
                    detail: genre.description.clone(),
                }
            }),
        }
    }

    fn card(&self, movie: &Movie, highlight: Option<(&SkimMatcherV2, &str)>) -> MovieCard {
        MovieCard {
            id: movie.id,
            title: movie.title.clone(),
            release_year: movie.release_year,
            genre: movie.genre_name().to_string(),
            director: movie.director.clone(),
            rating: movie.rating,
            blurb: movie.blurb(),
            highlight_ranges: highlight
                .map(|(matcher, term)| highlight_ranges(&movie.title, term, matcher))
                .unwrap_or_default(),
            show_admin_actions: self.context.is_admin(),
        }
    }

    fn compute_home(&self) -> Body {
        let Some(categories) = &self.categories else {
            return Body::Loading("Loading movies...".to_string());
        };

        let rows: Vec<CarouselRow> = categories
            .iter()
            .filter(|category| !category.is_empty())
            .map(|category| {
                let scroll = self.carousels.get(&category.genre_name).copied().unwrap_or_else(|| {
                    CarouselScroll::for_cards(category.movies.len(), self.carousel_width)
                });
                CarouselRow {
                    genre_name: category.genre_name.clone(),
                    movie_count: category.movie_count,
                    cards: category.movies.iter().map(|m| self.card(m, None)).collect(),
                    show_left_arrow: scroll.can_scroll_left(),
                    show_right_arrow: scroll.can_scroll_right(),
                }
            })
            .collect();

        if rows.is_empty() {
            return Body::Empty("No movies available. Add some movies to get started!".to_string());
        }
        Body::Home(rows)
    }

    fn compute_search(&self) -> SearchView {
        let term = self.search.term().to_string();
        match self.search.phase() {
            SearchPhase::Idle | SearchPhase::Pending => SearchView::Pending { term },
            SearchPhase::Searching => SearchView::Searching { term },
            SearchPhase::NoResults => SearchView::NoResults { term },
            SearchPhase::Failed(message) => SearchView::Failed {
                term,
                message: message.clone(),
            },
            SearchPhase::Results(groups) => {
                let matcher = SkimMatcherV2::default();
                let groups = groups
                    .iter()
                    .map(|group| SearchGroup {
                        genre_name: group.genre_name.clone(),
                        cards: group
                            .movies
                            .iter()
                            .map(|m| self.card(m, Some((&matcher, &term))))
                            .collect(),
                    })
                    .collect();
                SearchView::Results { term, groups }
            }
        }
    }

    fn compute_grid(&self, genre: &str) -> GridView {
        let cards: Vec<MovieCard> = self.pager.items().iter().map(|m| self.card(m, None)).collect();
        let loaded_any = !cards.is_empty();
        GridView {
            genre: genre.to_string(),
            progress: self.pager.total().map(|total| (cards.len(), total)),
            loading_more: self.pager.is_loading(),
            end_message: (loaded_any && !self.pager.has_more())
                .then(|| format!("You've reached the end of {genre} movies")),
            empty_message: self
                .pager
                .is_empty_result()
                .then(|| format!("No movies found in {genre}")),
            error: self.pager.error().map(str::to_string),
            cards,
        }
    }

    fn compute_movie(&self, movie: &Movie) -> MovieDetailView {
        MovieDetailView {
            card: self.card(movie, None),
            description: movie.description.clone(),
            language: movie.language.clone(),
            cast: movie
                .cast
                .iter()
                .flatten()
                .map(|actor| CastLine {
                    actor_id: actor.id,
                    name: actor.name.clone(),
                    role: actor.role.clone(),
                })
                .collect(),
            reviews: self.reviews.as_ref().map(|reviews| {
                reviews
                    .iter()
                    .map(|review| ReviewLine {
                        reviewer_name: review.reviewer_name.clone(),
                        rating: review.rating,
                        comment: review.comment.clone(),
                        date: review.created_at.format("%Y-%m-%d").to_string(),
                    })
                    .collect()
            }),
            reviews_error: self.reviews_error.clone(),
            review_error: self.review_error.clone(),
        }
    }

    fn compute_person(
        &self,
        name: &str,
        bio: Option<&str>,
        birth_year: Option<i32>,
        movies: Option<&[Movie]>,
    ) -> PersonView {
        PersonView {
            name: name.to_string(),
            bio: bio.map(str::to_string),
            birth_year,
            filmography: movies
                .unwrap_or_default()
                .iter()
                .map(|m| self.card(m, None))
                .collect(),
        }
    }

    fn compute_list<T>(
        items: Option<&Vec<T>>,
        empty_message: &str,
        to_item: impl Fn(&T) -> ListItem,
    ) -> Body {
        items.map_or_else(
            || Body::Loading("Loading...".to_string()),
            |items| {
                Body::List(ListView {
                    items: items.iter().map(to_item).collect(),
                    empty_message: empty_message.to_string(),
                })
            },
        )
    }

    fn compute_form(&self) -> Option<FormView> {
        if !self.context.show_form() {
            return None;
        }

        let draft = self.context.draft();
        let text = |value: Option<&String>| value.cloned().unwrap_or_default();
        let fields = vec![
            ("Title".to_string(), text(draft.map(|d| &d.title))),
            ("Director".to_string(), text(draft.map(|d| &d.director_name))),
            (
                "Release year".to_string(),
                draft.map(|d| d.release_year.to_string()).unwrap_or_default(),
            ),
            ("Genre".to_string(), text(draft.map(|d| &d.genre_name))),
            (
                "Rating".to_string(),
                draft.and_then(|d| d.rating).map(|r| r.to_string()).unwrap_or_default(),
            ),
            ("Description".to_string(), text(draft.and_then(|d| d.description.as_ref()))),
            ("Language".to_string(), text(draft.and_then(|d| d.language.as_ref()))),
            ("Image URL".to_string(), text(draft.and_then(|d| d.image_url.as_ref()))),
        ];

        Some(FormView {
            heading: if self.context.editing_movie().is_some() {
                "Edit Movie".to_string()
            } else {
                "Add Movie".to_string()
            },
            fields,
            error: self.context.form_error().map(str::to_string),
            submitting: self.context.is_submitting(),
        })
    }

    fn compute_confirm(&self) -> Option<ConfirmView> {
        self.context.delete_target().map(|movie| ConfirmView {
            title: movie.title.clone(),
            subtitle: format!("{} • {}", movie.release_year, movie.genre_name()),
            director: format!("Directed by {}", movie.director),
            deleting: self.context.is_deleting(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieInput;
    use chrono::Utc;

    fn movie(id: i64, title: &str, genre: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            director: "Someone".to_string(),
            director_id: None,
            release_year: 2001,
            genre: Some(genre.to_string()),
            rating: Some(7.5),
            description: None,
            language: None,
            image_url: None,
            created_at: Utc::now(),
            cast: None,
            reviews: None,
        }
    }

    fn category(name: &str, movies: Vec<Movie>) -> Category {
        Category {
            genre_id: 1,
            genre_name: name.to_string(),
            genre_description: None,
            #[allow(clippy::cast_possible_truncation)]
            movie_count: movies.len() as u32,
            movies,
        }
    }

    fn state() -> AppState {
        AppState::new(10, Duration::from_millis(300), true)
    }

    #[test]
    fn home_is_loading_until_categories_arrive() {
        let state = state();
        assert_eq!(
            state.compute_viewmodel().body,
            Body::Loading("Loading movies...".to_string())
        );
    }

    #[test]
    fn empty_categories_are_not_rendered() {
        let mut state = state();
        state.set_categories(vec![
            category("Drama", vec![movie(1, "A", "Drama")]),
            category("Western", vec![]),
        ]);
        let Body::Home(rows) = state.compute_viewmodel().body else {
            panic!("expected carousels");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].genre_name, "Drama");
        assert!(!rows[0].show_left_arrow);
        assert!(!rows[0].show_right_arrow);
    }

    #[test]
    fn all_empty_categories_show_empty_state() {
        let mut state = state();
        state.set_categories(vec![category("Western", vec![])]);
        assert!(matches!(state.compute_viewmodel().body, Body::Empty(_)));
    }

    #[test]
    fn wide_carousel_shows_right_arrow() {
        let mut state = state();
        let movies = (0..10).map(|id| movie(id, "X", "Drama")).collect();
        state.set_categories(vec![category("Drama", movies)]);
        let Body::Home(rows) = state.compute_viewmodel().body else {
            panic!("expected carousels");
        };
        assert!(rows[0].show_right_arrow);
        assert!(!rows[0].show_left_arrow);
    }

    #[test]
    fn viewer_mode_hides_admin_actions() {
        let mut state = state();
        state.context.set_admin(false);
        state.set_categories(vec![category("Drama", vec![movie(1, "A", "Drama")])]);
        let Body::Home(rows) = state.compute_viewmodel().body else {
            panic!("expected carousels");
        };
        assert!(!rows[0].cards[0].show_admin_actions);
    }

    #[test]
    fn not_found_uses_page_title() {
        let mut state = state();
        state.view = View::Movie(42);
        state.load_error = Some(LoadError {
            message: "movie 42 not found".to_string(),
            not_found: true,
        });
        assert_eq!(
            state.compute_viewmodel().body,
            Body::Failed {
                message: "Movie not found".to_string(),
                not_found: true,
            }
        );
    }

    #[test]
    fn edit_form_is_prefilled() {
        let mut state = state();
        let mut heat = movie(7, "Heat", "Crime");
        heat.director = "Michael Mann".to_string();
        state.context.handle_edit(heat);
        let form = state.compute_viewmodel().form.expect("form open");
        assert_eq!(form.heading, "Edit Movie");
        assert_eq!(form.fields[0], ("Title".to_string(), "Heat".to_string()));
        assert_eq!(form.fields[1].1, "Michael Mann");

        state.context.close_form();
        state.context.open_create();
        state
            .context
            .begin_submit(MovieInput::new("Alien", "Ridley Scott", 1979, "Horror"));
        let form = state.compute_viewmodel().form.expect("form open");
        assert_eq!(form.heading, "Add Movie");
        assert!(form.submitting);
    }

    #[test]
    fn sentinel_needs_a_viewport() {
        let mut state = state();
        assert!(!state.sentinel_visible(0));
        state.viewport = Some(Span::new(0.0, 800.0));
        assert!(state.sentinel_visible(0));
        assert!(!state.sentinel_visible(40));
    }
}
