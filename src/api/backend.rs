//! Port trait for the catalog REST backend.
//!
//! Everything above this trait (cache, controllers, worker) is written against
//! [`CatalogBackend`]; [`HttpBackend`](super::HttpBackend) talks to the real server
//! and [`MemoryBackend`](super::MemoryBackend) stands in for it in tests and demos.

use super::models::{
    ActorList, ActorQuery, CategoryList, DirectorList, GenreList, MovieList, MoviePage,
    MovieQuery, ReviewList,
};
use crate::domain::{Actor, Director, Movie, MovieInput, MovieUpdate, Result, Review, ReviewInput};
use async_trait::async_trait;

/// Typed operations of the catalog REST API. No retries happen at this level.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    // Movies
    async fn list_movies(&self, query: &MovieQuery) -> Result<CategoryList>;
    async fn get_movie(&self, id: i64) -> Result<Movie>;
    async fn create_movie(&self, input: &MovieInput) -> Result<Movie>;
    async fn update_movie(&self, id: i64, update: &MovieUpdate) -> Result<Movie>;
    async fn delete_movie(&self, id: i64) -> Result<()>;
    async fn search_movies(&self, term: &str) -> Result<MovieList>;
    async fn movies_by_genre(&self, genre: &str, limit: u32, offset: u32) -> Result<MoviePage>;

    // People
    async fn list_actors(&self, query: &ActorQuery) -> Result<ActorList>;
    async fn get_actor(&self, id: i64) -> Result<Actor>;
    async fn list_directors(&self) -> Result<DirectorList>;
    async fn get_director(&self, id: i64) -> Result<Director>;

    // Genres and reviews
    async fn list_genres(&self) -> Result<GenreList>;
    async fn movie_reviews(&self, movie_id: i64) -> Result<ReviewList>;
    async fn create_review(&self, input: &ReviewInput) -> Result<Review>;
}
