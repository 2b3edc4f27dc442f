//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place [`AppState`] changes. It pattern-matches
//! the event, mutates state, and returns the actions the runtime should
//! execute. It performs no I/O and never reads a clock: time arrives inside
//! events, so debounce behaviour is fully determined by the event sequence.
//!
//! # Event Types
//!
//! - **Navigation**: `ShowHome`, `ShowGenre`, `ShowMovie`, `ShowActor`, ...
//! - **Search**: `SearchInput`, `ClearSearch`, `Tick`
//! - **Scrolling**: `Scroll` (genre grid), `ScrollCarousel` (home rows)
//! - **Admin**: `ToggleAdmin`, `EditMovie`, `AddMovie`, `SubmitMovie`,
//!   `RequestDelete`, `ConfirmDelete`, `SubmitReview`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use marquee::app::{handle_event, AppState, Event};
//! use std::time::Duration;
//!
//! let mut state = AppState::new(10, Duration::from_millis(300), true);
//! let (render, actions) = handle_event(&mut state, &Event::ShowGenres)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::View;
use super::state::LoadError;
use crate::api::{ActorQuery, MovieQuery};
use crate::app::{Action, AppState};
use crate::domain::{Movie, MovieInput, Result, ReviewInput};
use crate::pagination::{PageRequest, Span};
use crate::query::{Mutation, QueryKey};
use crate::ui::carousel::ScrollDirection;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::time::Instant;

/// Events triggered by user input, timers, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Shows the home page, optionally with new filters.
    ShowHome(Option<MovieQuery>),
    ShowGenre(String),
    ShowMovie(i64),
    ShowActor(i64),
    ShowDirector(i64),
    ShowActors,
    ShowDirectors,
    ShowGenres,

    /// The search box now reads `text`.
    SearchInput {
        text: String,
        at: Instant,
    },
    ClearSearch,

    /// Timer requested through [`Action::ScheduleTick`] fired.
    Tick(Instant),

    /// The genre grid's scroll viewport moved or resized.
    Scroll {
        viewport: Span,
    },

    /// An arrow on a home carousel was clicked.
    ScrollCarousel {
        genre: String,
        direction: ScrollDirection,
    },

    ToggleAdmin,
    EditMovie(Movie),
    AddMovie,
    CancelForm,
    SubmitMovie(MovieInput),
    RequestDelete(Movie),
    ConfirmDelete,
    CancelDelete,
    SubmitReview(ReviewInput),

    /// Wraps a response from the worker.
    WorkerResponse(WorkerResponse),
}

fn load(message: WorkerMessage) -> Vec<Action> {
    vec![Action::PostToWorker(message)]
}

fn load_page(request: Option<PageRequest>) -> Vec<Action> {
    request
        .map(|request| Action::PostToWorker(WorkerMessage::LoadPage { request }))
        .into_iter()
        .collect()
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(render, actions)`: whether the view changed, and the side effects to run
/// in order.
///
/// # Errors
///
/// Reserved for failures of state transitions; every current transition is
/// infallible and operation failures are carried in state instead.
///
/// # Tracing
///
/// Each call runs inside a debug span carrying the event.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::ShowHome(filters) => {
            if let Some(query) = filters {
                state.set_home_filters(query.clone());
            }
            state.view = View::Home;
            state.clear_page_data();
            Ok((
                true,
                load(WorkerMessage::LoadHome {
                    query: state.home_query.clone(),
                }),
            ))
        }
        Event::ShowGenre(genre) => {
            state.view = View::Genre(genre.clone());
            state.clear_page_data();
            let request = state.pager.reset(genre);
            let visible = state.sentinel_visible(0);
            state.pager.on_visibility(visible);
            Ok((true, load_page(request)))
        }
        Event::ShowMovie(id) => {
            state.view = View::Movie(*id);
            state.clear_page_data();
            Ok((
                true,
                vec![
                    Action::PostToWorker(WorkerMessage::LoadMovie { id: *id }),
                    Action::PostToWorker(WorkerMessage::LoadReviews { movie_id: *id }),
                ],
            ))
        }
        Event::ShowActor(id) => {
            state.view = View::Actor(*id);
            state.clear_page_data();
            Ok((true, load(WorkerMessage::LoadActor { id: *id })))
        }
        Event::ShowDirector(id) => {
            state.view = View::Director(*id);
            state.clear_page_data();
            Ok((true, load(WorkerMessage::LoadDirector { id: *id })))
        }
        Event::ShowActors => {
            state.view = View::Actors;
            state.clear_page_data();
            Ok((
                true,
                load(WorkerMessage::LoadActors {
                    query: ActorQuery::default(),
                }),
            ))
        }
        Event::ShowDirectors => {
            state.view = View::Directors;
            state.clear_page_data();
            Ok((true, load(WorkerMessage::LoadDirectors)))
        }
        Event::ShowGenres => {
            state.view = View::Genres;
            state.clear_page_data();
            Ok((true, load(WorkerMessage::LoadGenres)))
        }

        Event::SearchInput { text, at } => {
            state.search.set_input(text, *at);
            tracing::trace!(input = %text, phase = ?state.search.phase(), "search input updated");
            let actions = state
                .search
                .deadline()
                .map(Action::ScheduleTick)
                .into_iter()
                .collect();
            Ok((true, actions))
        }
        Event::ClearSearch => {
            state.search.clear();
            Ok((true, vec![]))
        }
        Event::Tick(now) => {
            if let Some(term) = state.search.poll(*now) {
                return Ok((true, load(WorkerMessage::Search { term })));
            }
            // Early tick: the debounce window moved since it was scheduled.
            let actions = state
                .search
                .deadline()
                .map(Action::ScheduleTick)
                .into_iter()
                .collect();
            Ok((false, actions))
        }

        Event::Scroll { viewport } => {
            state.viewport = Some(*viewport);
            if !matches!(state.view, View::Genre(_)) {
                return Ok((false, vec![]));
            }
            let visible = state.sentinel_visible(state.pager.items().len());
            let request = state.pager.on_visibility(visible);
            Ok((request.is_some(), load_page(request)))
        }
        Event::ScrollCarousel { genre, direction } => {
            let Some(row) = state.carousels.get_mut(genre) else {
                tracing::debug!(genre = %genre, "no carousel for genre");
                return Ok((false, vec![]));
            };
            row.scroll(*direction);
            Ok((true, vec![]))
        }

        Event::ToggleAdmin => {
            state.context.toggle_admin();
            tracing::debug!(is_admin = state.context.is_admin(), "admin mode toggled");
            Ok((true, vec![]))
        }
        Event::EditMovie(movie) => {
            state.context.handle_edit(movie.clone());
            Ok((true, vec![]))
        }
        Event::AddMovie => {
            state.context.open_create();
            Ok((true, vec![]))
        }
        Event::CancelForm => {
            state.context.close_form();
            Ok((true, vec![]))
        }
        Event::SubmitMovie(input) => {
            if state.context.is_submitting() {
                tracing::debug!("submit already in flight");
                return Ok((false, vec![]));
            }
            state.context.begin_submit(input.clone());
            if let Err(error) = input.validate() {
                state.context.submit_failed(error.user_message());
                return Ok((true, vec![]));
            }

            let message = match state.context.editing_movie() {
                Some(movie) => WorkerMessage::UpdateMovie {
                    id: movie.id,
                    update: input.clone().into(),
                },
                None => WorkerMessage::CreateMovie {
                    input: input.clone(),
                },
            };
            Ok((true, load(message)))
        }
        Event::RequestDelete(movie) => {
            state.context.request_delete(movie.clone());
            Ok((true, vec![]))
        }
        Event::ConfirmDelete => match state.context.confirm_delete() {
            Some(id) => Ok((true, load(WorkerMessage::DeleteMovie { id }))),
            None => Ok((false, vec![])),
        },
        Event::CancelDelete => {
            state.context.cancel_delete();
            Ok((true, vec![]))
        }
        Event::SubmitReview(input) => {
            if let Err(error) = input.validate() {
                state.review_error = Some(error.user_message());
                return Ok((true, vec![]));
            }
            state.review_error = None;
            Ok((
                true,
                load(WorkerMessage::CreateReview {
                    input: input.clone(),
                }),
            ))
        }

        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

#[allow(clippy::too_many_lines)]
fn handle_worker_response(
    state: &mut AppState,
    response: &WorkerResponse,
) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::HomeLoaded { query, categories } => {
            if *query != state.home_query {
                tracing::debug!("discarding categories for previous filters");
                return Ok((false, vec![]));
            }
            tracing::debug!(categories = categories.len(), "home categories loaded");
            state.set_categories(categories.clone());
            Ok((state.view == View::Home, vec![]))
        }
        WorkerResponse::SearchCompleted { term, movies } => {
            let applied = state.search.apply(term, Ok(movies.clone()));
            Ok((applied, vec![]))
        }
        WorkerResponse::SearchFailed { term, message } => {
            let applied = state.search.apply(term, Err(message.clone()));
            Ok((applied, vec![]))
        }
        WorkerResponse::PageLoaded { request, page } => {
            if request.epoch == state.pager.epoch() {
                // Decide visibility against the grid as it will be once the page lands.
                let visible = state.sentinel_visible(state.pager.items().len() + page.movies.len());
                state.pager.on_visibility(visible);
            }
            let next = state.pager.apply(request, Ok(page.clone()));
            Ok((true, load_page(next)))
        }
        WorkerResponse::PageFailed { request, message } => {
            state.pager.apply(request, Err(message.clone()));
            Ok((true, vec![]))
        }
        WorkerResponse::MovieLoaded { movie } => {
            if state.view != View::Movie(movie.id) {
                return Ok((false, vec![]));
            }
            state.movie = Some(movie.clone());
            state.load_error = None;
            Ok((true, vec![]))
        }
        WorkerResponse::ReviewsLoaded { movie_id, reviews } => {
            if state.view != View::Movie(*movie_id) {
                return Ok((false, vec![]));
            }
            state.reviews = Some(reviews.clone());
            state.reviews_error = None;
            Ok((true, vec![]))
        }
        WorkerResponse::ActorLoaded { actor } => {
            if state.view != View::Actor(actor.id) {
                return Ok((false, vec![]));
            }
            state.actor = Some(actor.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::DirectorLoaded { director } => {
            if state.view != View::Director(director.id) {
                return Ok((false, vec![]));
            }
            state.director = Some(director.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::ActorsLoaded { actors } => {
            state.actors = Some(actors.clone());
            Ok((state.view == View::Actors, vec![]))
        }
        WorkerResponse::DirectorsLoaded { directors } => {
            state.directors = Some(directors.clone());
            Ok((state.view == View::Directors, vec![]))
        }
        WorkerResponse::GenresLoaded { genres } => {
            state.genres = Some(genres.clone());
            Ok((state.view == View::Genres, vec![]))
        }
        WorkerResponse::LoadFailed {
            target,
            message,
            not_found,
        } => {
            // The review list is its own section of the movie page.
            if let View::Movie(id) = state.view {
                if *target == QueryKey::Reviews(id).to_string() {
                    tracing::debug!(movie_id = id, "review list failed to load");
                    state.reviews = None;
                    state.reviews_error = Some(message.clone());
                    return Ok((true, vec![]));
                }
            }
            let concerns_view = state
                .view
                .keys(&state.home_query)
                .iter()
                .any(|key| key.to_string() == *target);
            if !concerns_view {
                tracing::debug!(target = %target, "ignoring failure for another page");
                return Ok((false, vec![]));
            }
            state.load_error = Some(LoadError {
                message: message.clone(),
                not_found: *not_found,
            });
            Ok((true, vec![]))
        }

        WorkerResponse::MovieSaved { movie, created } => {
            state.context.submit_succeeded();
            state.notice = Some(if *created {
                format!("Added \"{}\"", movie.title)
            } else {
                format!("Saved \"{}\"", movie.title)
            });
            Ok((true, refresh_genre_page(state)))
        }
        WorkerResponse::MovieDeleted { id } => {
            let title = state
                .context
                .delete_target()
                .map_or_else(|| format!("movie {id}"), |m| format!("\"{}\"", m.title));
            state.context.delete_finished();
            state.notice = Some(format!("Deleted {title}"));

            if state.view == View::Movie(*id) {
                state.view = View::Home;
                state.clear_page_data();
                return Ok((
                    true,
                    load(WorkerMessage::LoadHome {
                        query: state.home_query.clone(),
                    }),
                ));
            }
            Ok((true, refresh_genre_page(state)))
        }
        WorkerResponse::ReviewCreated { review } => {
            state.review_error = None;
            state.notice = Some(format!("Review by {} added", review.reviewer_name));
            Ok((true, vec![]))
        }
        WorkerResponse::WriteFailed { mutation, message } => {
            match mutation {
                Mutation::CreateMovie | Mutation::UpdateMovie(_) => {
                    state.context.submit_failed(message.clone());
                }
                Mutation::DeleteMovie(_) => {
                    state.context.delete_finished();
                    state.notice = Some(message.clone());
                }
                Mutation::CreateReview => state.review_error = Some(message.clone()),
            }
            Ok((true, vec![]))
        }
    }
}

/// Genre pages are not cache-backed, so a write restarts them from the top.
fn refresh_genre_page(state: &mut AppState) -> Vec<Action> {
    let View::Genre(genre) = &state.view else {
        return vec![];
    };
    let genre = genre.clone();
    let request = state.pager.reset(&genre);
    let visible = state.sentinel_visible(0);
    state.pager.on_visibility(visible);
    load_page(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MoviePage;
    use crate::search::SearchPhase;
    use chrono::Utc;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(10, Duration::from_millis(300), true)
    }

    fn movie(id: i64, genre: &str) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            director: "Someone".to_string(),
            director_id: None,
            release_year: 2000,
            genre: Some(genre.to_string()),
            rating: None,
            description: None,
            language: None,
            image_url: None,
            created_at: Utc::now(),
            cast: None,
            reviews: None,
        }
    }

    fn page(ids: std::ops::Range<i64>, total: u32, has_more: bool) -> MoviePage {
        let movies: Vec<Movie> = ids.map(|id| movie(id, "Drama")).collect();
        #[allow(clippy::cast_possible_truncation)]
        let count = movies.len() as u32;
        MoviePage {
            movies,
            count,
            total,
            has_more,
        }
    }

    fn only_page_request(actions: &[Action]) -> PageRequest {
        match actions {
            [Action::PostToWorker(WorkerMessage::LoadPage { request })] => request.clone(),
            other => panic!("expected one page request, got {other:?}"),
        }
    }

    #[test]
    fn search_input_schedules_tick_and_poll_issues_request() {
        let mut state = state();
        let start = Instant::now();

        let (_, actions) = handle_event(
            &mut state,
            &Event::SearchInput {
                text: "matrix".into(),
                at: start,
            },
        )
        .unwrap();
        let deadline = start + Duration::from_millis(300);
        assert_eq!(actions, vec![Action::ScheduleTick(deadline)]);

        let (_, early) =
            handle_event(&mut state, &Event::Tick(start + Duration::from_millis(100))).unwrap();
        assert_eq!(early, vec![Action::ScheduleTick(deadline)]);

        let (_, actions) = handle_event(&mut state, &Event::Tick(deadline)).unwrap();
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::Search {
                term: "matrix".into()
            })]
        );
        assert_eq!(*state.search.phase(), SearchPhase::Searching);
    }

    #[test]
    fn blank_search_input_issues_nothing() {
        let mut state = state();
        let (_, actions) = handle_event(
            &mut state,
            &Event::SearchInput {
                text: "   ".into(),
                at: Instant::now(),
            },
        )
        .unwrap();
        assert!(actions.is_empty());
        assert_eq!(*state.search.phase(), SearchPhase::Idle);
    }

    #[test]
    fn genre_page_chains_while_sentinel_visible() {
        let mut state = state();
        state.viewport = Some(Span::new(0.0, 900.0));

        let (_, actions) = handle_event(&mut state, &Event::ShowGenre("Drama".into())).unwrap();
        let first = only_page_request(&actions);
        assert_eq!(first.offset, 0);

        // Four cards fill one row; the sentinel at 380px stays in view.
        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::PageLoaded {
                request: first,
                page: page(0..4, 30, true),
            }),
        )
        .unwrap();
        let second = only_page_request(&actions);
        assert_eq!(second.offset, 20);
    }

    #[test]
    fn scroll_into_view_requests_next_page() {
        let mut state = state();
        state.viewport = Some(Span::new(0.0, 900.0));
        let (_, actions) = handle_event(&mut state, &Event::ShowGenre("Drama".into())).unwrap();
        let first = only_page_request(&actions);

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::PageLoaded {
                request: first,
                page: page(0..20, 25, true),
            }),
        )
        .unwrap();
        assert!(actions.is_empty());

        let (_, actions) = handle_event(
            &mut state,
            &Event::Scroll {
                viewport: Span::new(1400.0, 900.0),
            },
        )
        .unwrap();
        assert_eq!(only_page_request(&actions).offset, 20);
    }

    #[test]
    fn invalid_submit_keeps_form_open_without_request() {
        let mut state = state();
        handle_event(&mut state, &Event::AddMovie).unwrap();
        let (_, actions) = handle_event(
            &mut state,
            &Event::SubmitMovie(MovieInput::new("", "Ridley Scott", 1979, "Horror")),
        )
        .unwrap();
        assert!(actions.is_empty());
        assert!(state.context.show_form());
        assert_eq!(state.context.form_error(), Some("Title is required"));
        assert!(!state.context.is_submitting());
    }

    #[test]
    fn editing_submits_update() {
        let mut state = state();
        handle_event(&mut state, &Event::EditMovie(movie(9, "Drama"))).unwrap();
        let input = MovieInput::new("Renamed", "Someone", 2000, "Drama");
        let (_, actions) = handle_event(&mut state, &Event::SubmitMovie(input.clone())).unwrap();
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::UpdateMovie {
                id: 9,
                update: input.into(),
            })]
        );
    }

    #[test]
    fn server_failure_keeps_form_populated() {
        let mut state = state();
        handle_event(&mut state, &Event::AddMovie).unwrap();
        let input = MovieInput::new("Alien", "Ridley Scott", 1979, "Horror");
        handle_event(&mut state, &Event::SubmitMovie(input.clone())).unwrap();

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::WriteFailed {
                mutation: Mutation::CreateMovie,
                message: "Genre not allowed".into(),
            }),
        )
        .unwrap();
        assert!(state.context.show_form());
        assert_eq!(state.context.draft(), Some(&input));
        assert_eq!(state.context.form_error(), Some("Genre not allowed"));
    }

    #[test]
    fn deleting_viewed_movie_returns_home() {
        let mut state = state();
        handle_event(&mut state, &Event::ShowMovie(5)).unwrap();
        handle_event(&mut state, &Event::RequestDelete(movie(5, "Drama"))).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
        assert_eq!(
            actions,
            vec![Action::PostToWorker(WorkerMessage::DeleteMovie { id: 5 })]
        );
        let (_, again) = handle_event(&mut state, &Event::ConfirmDelete).unwrap();
        assert!(again.is_empty());

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::MovieDeleted { id: 5 }),
        )
        .unwrap();
        assert_eq!(state.view, View::Home);
        assert!(state.context.delete_target().is_none());
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::LoadHome { .. })]
        ));
    }

    #[test]
    fn failures_for_other_pages_are_ignored() {
        let mut state = state();
        handle_event(&mut state, &Event::ShowMovie(5)).unwrap();
        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::LoadFailed {
                target: "movie/6".into(),
                message: "gone".into(),
                not_found: true,
            }),
        )
        .unwrap();
        assert!(!render);
        assert!(state.load_error.is_none());

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::LoadFailed {
                target: "movie/5".into(),
                message: "gone".into(),
                not_found: true,
            }),
        )
        .unwrap();
        assert!(state.load_error.as_ref().is_some_and(|e| e.not_found));
    }

    #[test]
    fn review_list_failure_keeps_movie_detail() {
        let mut state = state();
        handle_event(&mut state, &Event::ShowMovie(5)).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::MovieLoaded {
                movie: movie(5, "Drama"),
            }),
        )
        .unwrap();
        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::LoadFailed {
                target: "movie/5/reviews".into(),
                message: "An error occurred".into(),
                not_found: true,
            }),
        )
        .unwrap();

        assert!(render);
        assert!(state.load_error.is_none());
        assert_eq!(state.reviews_error.as_deref(), Some("An error occurred"));
        let crate::ui::Body::Movie(detail) = state.compute_viewmodel().body else {
            panic!("movie detail should still render");
        };
        assert_eq!(detail.card.title, "Movie 5");
        assert_eq!(detail.reviews_error.as_deref(), Some("An error occurred"));
    }

    #[test]
    fn stale_home_filters_are_discarded() {
        let mut state = state();
        handle_event(
            &mut state,
            &Event::ShowHome(Some(MovieQuery {
                year: Some(1999),
                ..MovieQuery::default()
            })),
        )
        .unwrap();
        assert_eq!(state.home_query.limit_per_genre, Some(10));

        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::HomeLoaded {
                query: MovieQuery::home(10),
                categories: vec![],
            }),
        )
        .unwrap();
        assert!(!render);
        assert!(state.categories.is_none());
    }
}
