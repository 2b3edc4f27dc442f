//! Worker request and response types.
//!
//! The application layer never touches the network. It emits
//! [`WorkerMessage`]s as actions; the worker executes them against the cached
//! client and answers with [`WorkerResponse`]s, which come back in as events.

use crate::api::{ActorQuery, MoviePage, MovieQuery};
use crate::domain::{
    Actor, Category, Director, Genre, Movie, MovieInput, MovieUpdate, Review, ReviewInput,
};
use crate::pagination::PageRequest;
use crate::query::Mutation;

/// Requests handled by the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    /// Load the genre carousels.
    LoadHome {
        query: MovieQuery,
    },

    /// Run a debounced search.
    Search {
        term: String,
    },

    /// Fetch one page of a genre's movies.
    LoadPage {
        request: PageRequest,
    },

    LoadMovie {
        id: i64,
    },

    LoadReviews {
        movie_id: i64,
    },

    LoadActor {
        id: i64,
    },

    LoadDirector {
        id: i64,
    },

    LoadActors {
        query: ActorQuery,
    },

    LoadDirectors,

    LoadGenres,

    /// Create a movie from a validated form.
    CreateMovie {
        input: MovieInput,
    },

    /// Apply a partial update to an existing movie.
    UpdateMovie {
        id: i64,
        update: MovieUpdate,
    },

    DeleteMovie {
        id: i64,
    },

    CreateReview {
        input: ReviewInput,
    },
}

/// Outcomes reported by the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    HomeLoaded {
        query: MovieQuery,
        categories: Vec<Category>,
    },

    SearchCompleted {
        term: String,
        movies: Vec<Movie>,
    },

    /// A search request failed; `message` is displayable.
    SearchFailed {
        term: String,
        message: String,
    },

    PageLoaded {
        request: PageRequest,
        page: MoviePage,
    },

    PageFailed {
        request: PageRequest,
        message: String,
    },

    MovieLoaded {
        movie: Movie,
    },

    ReviewsLoaded {
        movie_id: i64,
        reviews: Vec<Review>,
    },

    ActorLoaded {
        actor: Actor,
    },

    DirectorLoaded {
        director: Director,
    },

    ActorsLoaded {
        actors: Vec<Actor>,
    },

    DirectorsLoaded {
        directors: Vec<Director>,
    },

    GenresLoaded {
        genres: Vec<Genre>,
    },

    /// Any other read failed.
    LoadFailed {
        /// What was being loaded, e.g. `"movie/5"`.
        target: String,
        message: String,
        not_found: bool,
    },

    /// A movie was created (`created`) or updated.
    MovieSaved {
        movie: Movie,
        created: bool,
    },

    MovieDeleted {
        id: i64,
    },

    ReviewCreated {
        review: Review,
    },

    /// A write failed; `message` is what the form shows inline.
    WriteFailed {
        mutation: Mutation,
        message: String,
    },
}
