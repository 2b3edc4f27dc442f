//! In-memory [`CatalogBackend`] with call accounting and fault injection.
//!
//! Mirrors the REST backend's observable behavior closely enough to drive the
//! cache, pagination, and search layers end to end without a server. Every
//! operation is counted under its trait method name, can be delayed by a fixed
//! latency (honoring tokio's paused clock), and can be forced to fail.

use super::backend::CatalogBackend;
use super::models::{
    ActorList, ActorQuery, CategoryList, DirectorList, GenreList, MovieList, MoviePage,
    MovieQuery, ReviewList,
};
use crate::domain::{
    Actor, Category, Director, Genre, MarqueeError, Movie, MovieInput, MovieUpdate, Result,
    Review, ReviewInput,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Detail text attached to injected failures.
pub const INJECTED_FAILURE: &str = "injected failure";

#[derive(Debug, Default)]
struct Store {
    movies: Vec<Movie>,
    genres: Vec<Genre>,
    actors: Vec<Actor>,
    directors: Vec<Director>,
    reviews: Vec<Review>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn genre_named(&mut self, name: &str) -> Genre {
        if let Some(genre) = self.genres.iter().find(|g| g.name.eq_ignore_ascii_case(name)) {
            return genre.clone();
        }
        let genre = Genre {
            id: self.next_id(),
            name: name.to_string(),
            description: None,
        };
        self.genres.push(genre.clone());
        genre
    }

    fn director_named(&mut self, name: &str) -> i64 {
        if let Some(director) = self.directors.iter().find(|d| d.name == name) {
            return director.id;
        }
        let id = self.next_id();
        self.directors.push(Director {
            id,
            name: name.to_string(),
            bio: None,
            birth_year: None,
            image_url: None,
            movies: None,
            movie_count: None,
        });
        id
    }

    fn actor_named(&mut self, name: &str) -> Actor {
        if let Some(actor) = self.actors.iter().find(|a| a.name == name) {
            return actor.clone();
        }
        let actor = Actor {
            id: self.next_id(),
            name: name.to_string(),
            bio: None,
            birth_year: None,
            image_url: None,
            role: None,
            movies: None,
            movie_count: None,
        };
        self.actors.push(actor.clone());
        actor
    }

    fn cast_from(&mut self, cast: &[crate::domain::CastInput]) -> Vec<Actor> {
        cast.iter()
            .map(|entry| Actor {
                role: Some(entry.role.clone()),
                ..self.actor_named(&entry.actor_name)
            })
            .collect()
    }

    /// List-endpoint projection: no embedded cast or reviews.
    fn summary(movie: &Movie) -> Movie {
        Movie {
            cast: None,
            reviews: None,
            ..movie.clone()
        }
    }

    fn movies_in_genre(&self, genre: &str) -> Vec<&Movie> {
        self.movies
            .iter()
            .filter(|m| m.genre.as_deref().is_some_and(|g| g.eq_ignore_ascii_case(genre)))
            .collect()
    }
}

/// In-memory catalog.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: Mutex<Store>,
    calls: Mutex<HashMap<&'static str, usize>>,
    failing: Mutex<HashSet<&'static str>>,
    latency: Mutex<Option<Duration>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a movie directly, bypassing call accounting. `genre: None` stores a
    /// movie without a genre, which the real backend can also return.
    pub fn insert_movie(
        &self,
        title: &str,
        director: &str,
        release_year: i32,
        genre: Option<&str>,
    ) -> Movie {
        let mut store = lock(&self.store);
        if let Some(name) = genre {
            store.genre_named(name);
        }
        let director_id = store.director_named(director);
        let movie = Movie {
            id: store.next_id(),
            title: title.to_string(),
            director: director.to_string(),
            director_id: Some(director_id),
            release_year,
            genre: genre.map(str::to_string),
            rating: None,
            description: None,
            language: None,
            image_url: None,
            created_at: Utc::now(),
            cast: Some(Vec::new()),
            reviews: None,
        };
        store.movies.push(movie.clone());
        movie
    }

    /// Registers a genre with no movies.
    pub fn insert_genre(&self, name: &str) -> Genre {
        lock(&self.store).genre_named(name)
    }

    /// Number of times `operation` (a trait method name) has been called.
    #[must_use]
    pub fn calls(&self, operation: &str) -> usize {
        lock(&self.calls).get(operation).copied().unwrap_or(0)
    }

    /// Makes every subsequent call of `operation` fail with HTTP 500.
    pub fn fail(&self, operation: &'static str) {
        lock(&self.failing).insert(operation);
    }

    /// Undoes [`fail`](Self::fail).
    pub fn recover(&self, operation: &'static str) {
        lock(&self.failing).remove(operation);
    }

    /// Delays every response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *lock(&self.latency) = Some(latency);
    }

    /// Counts the call, waits out the configured latency, then applies injected
    /// failures.
    async fn enter(&self, operation: &'static str) -> Result<()> {
        *lock(&self.calls).entry(operation).or_insert(0) += 1;

        let latency = *lock(&self.latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if lock(&self.failing).contains(operation) {
            return Err(MarqueeError::Status {
                status: 500,
                detail: Some(INJECTED_FAILURE.to_string()),
            });
        }
        Ok(())
    }
}

fn movie_not_found(id: i64) -> MarqueeError {
    MarqueeError::NotFound { entity: "movie", id }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[async_trait]
impl CatalogBackend for MemoryBackend {
    async fn list_movies(&self, query: &MovieQuery) -> Result<CategoryList> {
        self.enter("list_movies").await?;
        let store = lock(&self.store);

        let matches = |movie: &Movie| {
            query
                .director
                .as_deref()
                .map_or(true, |d| movie.director.to_lowercase().contains(&d.to_lowercase()))
                && query.year.map_or(true, |y| movie.release_year == y)
                && query.actor.as_deref().map_or(true, |a| {
                    movie.cast.iter().flatten().any(|actor| {
                        actor.name.to_lowercase().contains(&a.to_lowercase())
                    })
                })
        };

        let categories: Vec<Category> = store
            .genres
            .iter()
            .filter(|genre| {
                query
                    .genre
                    .as_deref()
                    .map_or(true, |g| genre.name.eq_ignore_ascii_case(g))
            })
            .filter_map(|genre| {
                let movies: Vec<Movie> = store
                    .movies_in_genre(&genre.name)
                    .into_iter()
                    .filter(|m| matches(*m))
                    .map(Store::summary)
                    .collect();
                if movies.is_empty() {
                    return None;
                }
                let movie_count = count(movies.len());
                let limit = query.limit_per_genre.map_or(movies.len(), |l| l as usize);
                Some(Category {
                    genre_id: genre.id,
                    genre_name: genre.name.clone(),
                    genre_description: genre.description.clone(),
                    movie_count,
                    movies: movies.into_iter().take(limit).collect(),
                })
            })
            .collect();

        Ok(CategoryList {
            total_categories: count(categories.len()),
            categories,
        })
    }

    async fn get_movie(&self, id: i64) -> Result<Movie> {
        self.enter("get_movie").await?;
        let store = lock(&self.store);
        let movie = store
            .movies
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| movie_not_found(id))?;
        let reviews = store
            .reviews
            .iter()
            .filter(|r| r.movie_id == id)
            .cloned()
            .collect();
        Ok(Movie {
            reviews: Some(reviews),
            ..movie.clone()
        })
    }

    async fn create_movie(&self, input: &MovieInput) -> Result<Movie> {
        self.enter("create_movie").await?;
        let mut store = lock(&self.store);
        store.genre_named(&input.genre_name);
        let director_id = store.director_named(&input.director_name);
        let cast = store.cast_from(input.cast.as_deref().unwrap_or_default());
        let movie = Movie {
            id: store.next_id(),
            title: input.title.clone(),
            director: input.director_name.clone(),
            director_id: Some(director_id),
            release_year: input.release_year,
            genre: Some(input.genre_name.clone()),
            rating: input.rating,
            description: input.description.clone(),
            language: input.language.clone(),
            image_url: input.image_url.clone(),
            created_at: Utc::now(),
            cast: Some(cast),
            reviews: None,
        };
        store.movies.push(movie.clone());
        Ok(movie)
    }

    async fn update_movie(&self, id: i64, update: &MovieUpdate) -> Result<Movie> {
        self.enter("update_movie").await?;
        let mut store = lock(&self.store);
        let index = store
            .movies
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| movie_not_found(id))?;

        if let Some(genre) = &update.genre_name {
            store.genre_named(genre);
        }
        let director_id = update
            .director_name
            .as_deref()
            .map(|name| store.director_named(name));
        let cast = update.cast.as_deref().map(|cast| store.cast_from(cast));

        let movie = &mut store.movies[index];
        if let Some(title) = &update.title {
            movie.title.clone_from(title);
        }
        if let Some(director) = &update.director_name {
            movie.director.clone_from(director);
            movie.director_id = director_id;
        }
        if let Some(year) = update.release_year {
            movie.release_year = year;
        }
        if let Some(genre) = &update.genre_name {
            movie.genre = Some(genre.clone());
        }
        if update.rating.is_some() {
            movie.rating = update.rating;
        }
        if update.description.is_some() {
            movie.description.clone_from(&update.description);
        }
        if update.language.is_some() {
            movie.language.clone_from(&update.language);
        }
        if update.image_url.is_some() {
            movie.image_url.clone_from(&update.image_url);
        }
        if cast.is_some() {
            movie.cast = cast;
        }
        Ok(movie.clone())
    }

    async fn delete_movie(&self, id: i64) -> Result<()> {
        self.enter("delete_movie").await?;
        let mut store = lock(&self.store);
        let before = store.movies.len();
        store.movies.retain(|m| m.id != id);
        if store.movies.len() == before {
            return Err(movie_not_found(id));
        }
        store.reviews.retain(|r| r.movie_id != id);
        Ok(())
    }

    async fn search_movies(&self, term: &str) -> Result<MovieList> {
        self.enter("search_movies").await?;
        let needle = term.trim().to_lowercase();
        let store = lock(&self.store);
        let movies: Vec<Movie> = if needle.is_empty() {
            Vec::new()
        } else {
            store
                .movies
                .iter()
                .filter(|m| {
                    m.title.to_lowercase().contains(&needle)
                        || m.director.to_lowercase().contains(&needle)
                        || m.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(&needle))
                })
                .map(Store::summary)
                .collect()
        };
        Ok(MovieList {
            count: count(movies.len()),
            movies,
        })
    }

    async fn movies_by_genre(&self, genre: &str, limit: u32, offset: u32) -> Result<MoviePage> {
        self.enter("movies_by_genre").await?;
        let store = lock(&self.store);
        let all = store.movies_in_genre(genre);
        let total = all.len();
        let start = (offset as usize).min(total);
        let end = start.saturating_add(limit as usize).min(total);
        let movies: Vec<Movie> = all[start..end].iter().map(|m| Store::summary(m)).collect();
        Ok(MoviePage {
            count: count(movies.len()),
            total: count(total),
            has_more: end < total,
            movies,
        })
    }

    async fn list_actors(&self, query: &ActorQuery) -> Result<ActorList> {
        self.enter("list_actors").await?;
        let store = lock(&self.store);
        let in_genre = |actor: &Actor| {
            query.genre.as_deref().map_or(true, |genre| {
                store.movies_in_genre(genre).iter().any(|m| {
                    m.cast.iter().flatten().any(|member| member.id == actor.id)
                })
            })
        };
        let actors: Vec<Actor> = store
            .actors
            .iter()
            .filter(|a| in_genre(*a))
            .skip(query.offset.unwrap_or(0) as usize)
            .take(query.limit.map_or(usize::MAX, |l| l as usize))
            .cloned()
            .collect();
        Ok(ActorList {
            count: count(actors.len()),
            actors,
        })
    }

    async fn get_actor(&self, id: i64) -> Result<Actor> {
        self.enter("get_actor").await?;
        let store = lock(&self.store);
        let actor = store
            .actors
            .iter()
            .find(|a| a.id == id)
            .ok_or(MarqueeError::NotFound { entity: "actor", id })?;
        let movies: Vec<Movie> = store
            .movies
            .iter()
            .filter(|m| m.cast.iter().flatten().any(|member| member.id == id))
            .map(Store::summary)
            .collect();
        Ok(Actor {
            movie_count: Some(count(movies.len())),
            movies: Some(movies),
            ..actor.clone()
        })
    }

    async fn list_directors(&self) -> Result<DirectorList> {
        self.enter("list_directors").await?;
        let store = lock(&self.store);
        Ok(DirectorList {
            count: count(store.directors.len()),
            directors: store.directors.clone(),
        })
    }

    async fn get_director(&self, id: i64) -> Result<Director> {
        self.enter("get_director").await?;
        let store = lock(&self.store);
        let director = store
            .directors
            .iter()
            .find(|d| d.id == id)
            .ok_or(MarqueeError::NotFound { entity: "director", id })?;
        let movies: Vec<Movie> = store
            .movies
            .iter()
            .filter(|m| m.director_id == Some(id))
            .map(Store::summary)
            .collect();
        Ok(Director {
            movie_count: Some(count(movies.len())),
            movies: Some(movies),
            ..director.clone()
        })
    }

    async fn list_genres(&self) -> Result<GenreList> {
        self.enter("list_genres").await?;
        let store = lock(&self.store);
        Ok(GenreList {
            count: count(store.genres.len()),
            genres: store.genres.clone(),
        })
    }

    async fn movie_reviews(&self, movie_id: i64) -> Result<ReviewList> {
        self.enter("movie_reviews").await?;
        let store = lock(&self.store);
        let reviews: Vec<Review> = store
            .reviews
            .iter()
            .filter(|r| r.movie_id == movie_id)
            .cloned()
            .collect();
        Ok(ReviewList {
            count: count(reviews.len()),
            reviews,
        })
    }

    async fn create_review(&self, input: &ReviewInput) -> Result<Review> {
        self.enter("create_review").await?;
        let mut store = lock(&self.store);
        if !store.movies.iter().any(|m| m.id == input.movie_id) {
            return Err(MarqueeError::Status {
                status: 404,
                detail: Some("Movie not found".to_string()),
            });
        }
        let review = Review {
            id: store.next_id(),
            movie_id: input.movie_id,
            reviewer_name: input.reviewer_name.clone(),
            rating: input.rating,
            comment: input.comment.clone(),
            created_at: Utc::now(),
        };
        store.reviews.push(review.clone());
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(n: usize) -> MemoryBackend {
        let backend = MemoryBackend::new();
        for i in 0..n {
            backend.insert_movie(&format!("Drama {i}"), "Someone", 2000, Some("Drama"));
        }
        backend
    }

    #[tokio::test]
    async fn genre_pages_report_has_more() {
        let backend = seeded(25);
        let first = backend.movies_by_genre("drama", 20, 0).await.expect("page");
        assert_eq!(first.movies.len(), 20);
        assert_eq!(first.total, 25);
        assert!(first.has_more);

        let second = backend.movies_by_genre("Drama", 20, 20).await.expect("page");
        assert_eq!(second.movies.len(), 5);
        assert!(!second.has_more);

        let past_end = backend.movies_by_genre("Drama", 20, 40).await.expect("page");
        assert!(past_end.movies.is_empty());
        assert_eq!(backend.calls("movies_by_genre"), 3);
    }

    #[tokio::test]
    async fn categories_are_capped_per_genre() {
        let backend = seeded(12);
        backend.insert_genre("Western");
        let list = backend
            .list_movies(&MovieQuery::home(10))
            .await
            .expect("categories");
        assert_eq!(list.total_categories, 1);
        assert_eq!(list.categories[0].movie_count, 12);
        assert_eq!(list.categories[0].movies.len(), 10);
    }

    #[tokio::test]
    async fn injected_failures_can_be_cleared() {
        let backend = seeded(1);
        backend.fail("list_genres");
        assert!(backend.list_genres().await.is_err());
        backend.recover("list_genres");
        assert!(backend.list_genres().await.is_ok());
        assert_eq!(backend.calls("list_genres"), 2);
    }

    #[tokio::test]
    async fn missing_movie_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend.get_movie(42).await.expect_err("no such movie");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn created_movie_gets_cast_and_filmography() {
        let backend = MemoryBackend::new();
        let mut input = MovieInput::new("Heat", "Michael Mann", 1995, "Crime");
        input.cast = Some(vec![crate::domain::CastInput {
            actor_name: "Al Pacino".to_string(),
            role: "Vincent Hanna".to_string(),
        }]);
        let movie = backend.create_movie(&input).await.expect("created");
        let cast = movie.cast.expect("cast embedded");
        assert_eq!(cast[0].role.as_deref(), Some("Vincent Hanna"));

        let actor = backend.get_actor(cast[0].id).await.expect("actor");
        assert_eq!(actor.movie_count, Some(1));
    }
}
