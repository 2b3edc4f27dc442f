//! Typed, cached access to the catalog.
//!
//! [`CatalogClient`] is what the rest of the crate talks to. Reads go through the
//! [`QueryCache`] and never fail outright: they return a [`QueryResult`] carrying
//! either data or the error. Writes go straight to the backend and, on success,
//! invalidate the tags their [`Mutation`] declares.

use super::cache::{QueryCache, QueryData, QueryStatus, SharedResult, Subscription};
use super::key::{Mutation, QueryKey};
use crate::api::{
    ActorList, ActorQuery, CatalogBackend, CategoryList, DirectorList, GenreList, MovieList,
    MoviePage, MovieQuery, ReviewList,
};
use crate::domain::{
    Actor, Director, MarqueeError, Movie, MovieInput, MovieUpdate, Result, Review, ReviewInput,
};
use futures_util::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// Outcome of a cached read: data on success, the shared error otherwise.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    pub data: Option<T>,
    pub error: Option<Arc<MarqueeError>>,
}

impl<T> QueryResult<T> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.data.is_some()
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Converts into a plain result for callers that want `?`.
    ///
    /// # Errors
    ///
    /// Returns the shared read error.
    pub fn into_result(self) -> std::result::Result<T, Arc<MarqueeError>> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err(Arc::new(MarqueeError::Decode(
                "query settled without data".to_string(),
            ))),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryResult<U> {
        QueryResult {
            data: self.data.map(f),
            error: self.error,
        }
    }
}

impl<T> QueryResult<T> {
    fn from_shared(result: SharedResult, extract: impl FnOnce(&QueryData) -> Option<T>) -> Self {
        match result {
            Ok(data) => match extract(&data) {
                Some(value) => Self {
                    data: Some(value),
                    error: None,
                },
                None => Self {
                    data: None,
                    error: Some(Arc::new(MarqueeError::Decode(
                        "cached value has an unexpected shape".to_string(),
                    ))),
                },
            },
            Err(error) => Self {
                data: None,
                error: Some(error),
            },
        }
    }
}

/// Cached catalog client. Clones share the backend and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    backend: Arc<dyn CatalogBackend>,
    cache: QueryCache,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            cache: QueryCache::new(),
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    #[must_use]
    pub fn subscribe(&self, key: QueryKey) -> Subscription {
        self.cache.subscribe(key)
    }

    #[must_use]
    pub fn status(&self, key: &QueryKey) -> QueryStatus {
        self.cache.status(key)
    }

    /// The backend call that answers `key`.
    fn request(&self, key: &QueryKey) -> BoxFuture<'static, Result<QueryData>> {
        let backend = Arc::clone(&self.backend);
        let key = key.clone();
        async move {
            match key {
                QueryKey::Movies(query) => backend.list_movies(&query).await.map(QueryData::Categories),
                QueryKey::Movie(id) => backend.get_movie(id).await.map(QueryData::Movie),
                QueryKey::Search(term) => backend.search_movies(&term).await.map(QueryData::Movies),
                QueryKey::GenrePage {
                    genre,
                    limit,
                    offset,
                } => backend
                    .movies_by_genre(&genre, limit, offset)
                    .await
                    .map(QueryData::Page),
                QueryKey::Actors(query) => backend.list_actors(&query).await.map(QueryData::Actors),
                QueryKey::Actor(id) => backend.get_actor(id).await.map(QueryData::Actor),
                QueryKey::Directors => backend.list_directors().await.map(QueryData::Directors),
                QueryKey::Director(id) => backend.get_director(id).await.map(QueryData::Director),
                QueryKey::Genres => backend.list_genres().await.map(QueryData::Genres),
                QueryKey::Reviews(movie_id) => {
                    backend.movie_reviews(movie_id).await.map(QueryData::Reviews)
                }
            }
        }
        .boxed()
    }

    /// Untyped cached read.
    pub async fn read(&self, key: &QueryKey) -> QueryResult<QueryData> {
        let result = self.cache.fetch(key, self.request(key)).await;
        QueryResult::from_shared(result, |data| Some(data.clone()))
    }

    /// Forces a fresh request for `key`, superseding anything in flight.
    pub async fn refetch(&self, key: &QueryKey) -> QueryResult<QueryData> {
        self.cache.invalidate_key(key);
        self.read(key).await
    }

    /// Re-fetches every stale key that still has a mounted consumer.
    pub async fn refresh_mounted(&self) -> Vec<(QueryKey, QueryResult<QueryData>)> {
        let mut refreshed = Vec::new();
        for key in self.cache.stale_mounted() {
            let result = self.read(&key).await;
            refreshed.push((key, result));
        }
        refreshed
    }

    async fn typed<T>(
        &self,
        key: QueryKey,
        extract: impl FnOnce(&QueryData) -> Option<T>,
    ) -> QueryResult<T> {
        let result = self.cache.fetch(&key, self.request(&key)).await;
        QueryResult::from_shared(result, extract)
    }

    pub async fn movies(&self, query: MovieQuery) -> QueryResult<CategoryList> {
        self.typed(QueryKey::Movies(query), |data| match data {
            QueryData::Categories(list) => Some(list.clone()),
            _ => None,
        })
        .await
    }

    pub async fn movie(&self, id: i64) -> QueryResult<Movie> {
        self.typed(QueryKey::Movie(id), |data| match data {
            QueryData::Movie(movie) => Some(movie.clone()),
            _ => None,
        })
        .await
    }

    pub async fn search_movies(&self, term: &str) -> QueryResult<MovieList> {
        self.typed(QueryKey::Search(term.to_string()), |data| match data {
            QueryData::Movies(list) => Some(list.clone()),
            _ => None,
        })
        .await
    }

    pub async fn movies_by_genre(&self, genre: &str, limit: u32, offset: u32) -> QueryResult<MoviePage> {
        let key = QueryKey::GenrePage {
            genre: genre.to_string(),
            limit,
            offset,
        };
        self.typed(key, |data| match data {
            QueryData::Page(page) => Some(page.clone()),
            _ => None,
        })
        .await
    }

    pub async fn actors(&self, query: ActorQuery) -> QueryResult<ActorList> {
        self.typed(QueryKey::Actors(query), |data| match data {
            QueryData::Actors(list) => Some(list.clone()),
            _ => None,
        })
        .await
    }

    pub async fn actor(&self, id: i64) -> QueryResult<Actor> {
        self.typed(QueryKey::Actor(id), |data| match data {
            QueryData::Actor(actor) => Some(actor.clone()),
            _ => None,
        })
        .await
    }

    pub async fn directors(&self) -> QueryResult<DirectorList> {
        self.typed(QueryKey::Directors, |data| match data {
            QueryData::Directors(list) => Some(list.clone()),
            _ => None,
        })
        .await
    }

    pub async fn director(&self, id: i64) -> QueryResult<Director> {
        self.typed(QueryKey::Director(id), |data| match data {
            QueryData::Director(director) => Some(director.clone()),
            _ => None,
        })
        .await
    }

    pub async fn genres(&self) -> QueryResult<GenreList> {
        self.typed(QueryKey::Genres, |data| match data {
            QueryData::Genres(list) => Some(list.clone()),
            _ => None,
        })
        .await
    }

    pub async fn movie_reviews(&self, movie_id: i64) -> QueryResult<ReviewList> {
        self.typed(QueryKey::Reviews(movie_id), |data| match data {
            QueryData::Reviews(list) => Some(list.clone()),
            _ => None,
        })
        .await
    }

    /// Applies `mutation`'s invalidations after a successful write.
    fn settle_write<T>(&self, mutation: Mutation, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => {
                let mounted = self.cache.invalidate(&mutation.invalidates());
                tracing::info!(?mutation, mounted = mounted.len(), "write succeeded");
            }
            Err(error) => tracing::warn!(?mutation, %error, "write failed"),
        }
        result
    }

    /// Creates a movie.
    ///
    /// # Errors
    ///
    /// Validation failures are returned without contacting the backend; backend
    /// failures are returned as-is. Nothing is invalidated on failure.
    pub async fn create_movie(&self, input: &MovieInput) -> Result<Movie> {
        input.validate()?;
        let result = self.backend.create_movie(input).await;
        self.settle_write(Mutation::CreateMovie, result)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// See [`create_movie`](Self::create_movie).
    pub async fn update_movie(&self, id: i64, update: &MovieUpdate) -> Result<Movie> {
        update.validate()?;
        let result = self.backend.update_movie(id, update).await;
        self.settle_write(Mutation::UpdateMovie(id), result)
    }

    /// Deletes a movie.
    ///
    /// # Errors
    ///
    /// Returns the backend failure; a missing movie is [`MarqueeError::NotFound`].
    pub async fn delete_movie(&self, id: i64) -> Result<()> {
        let result = self.backend.delete_movie(id).await;
        self.settle_write(Mutation::DeleteMovie(id), result)
    }

    /// Posts a review.
    ///
    /// # Errors
    ///
    /// See [`create_movie`](Self::create_movie).
    pub async fn create_review(&self, input: &ReviewInput) -> Result<Review> {
        input.validate()?;
        let result = self.backend.create_review(input).await;
        self.settle_write(Mutation::CreateReview, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::backend::MockCatalogBackend;
    use crate::api::MemoryBackend;

    #[tokio::test]
    async fn read_failures_become_error_state() {
        let mut backend = MockCatalogBackend::new();
        backend.expect_list_genres().times(1).returning(|| {
            Err(MarqueeError::Transport("connection refused".to_string()))
        });
        let client = CatalogClient::new(Arc::new(backend));

        let result = client.genres().await;
        assert!(result.data.is_none());
        assert!(result.is_error());
        assert_eq!(client.status(&QueryKey::Genres), QueryStatus::Error);
    }

    #[tokio::test]
    async fn invalid_writes_never_reach_the_backend() {
        let mut backend = MockCatalogBackend::new();
        backend.expect_create_movie().never();
        let client = CatalogClient::new(Arc::new(backend));

        let mut input = MovieInput::new("Heat", "Michael Mann", 1995, "Crime");
        input.rating = Some(11.0);
        let err = client.create_movie(&input).await.expect_err("invalid rating");
        assert!(matches!(err, MarqueeError::Validation(_)));
    }

    #[tokio::test]
    async fn failed_writes_keep_cached_reads_fresh() {
        let backend = Arc::new(MemoryBackend::new());
        let movie = backend.insert_movie("Heat", "Michael Mann", 1995, Some("Crime"));
        let client = CatalogClient::new(backend.clone());

        assert!(client.movie(movie.id).await.is_success());
        backend.fail("update_movie");
        let update = MovieUpdate {
            title: Some("Heat (1995)".to_string()),
            ..MovieUpdate::default()
        };
        assert!(client.update_movie(movie.id, &update).await.is_err());
        assert!(!client.cache().is_stale(&QueryKey::Movie(movie.id)));

        client.movie(movie.id).await;
        assert_eq!(backend.calls("get_movie"), 1);
    }

    #[tokio::test]
    async fn review_creation_refreshes_mounted_review_list() {
        let backend = Arc::new(MemoryBackend::new());
        let movie = backend.insert_movie("Heat", "Michael Mann", 1995, Some("Crime"));
        let client = CatalogClient::new(backend.clone());

        let _mounted = client.subscribe(QueryKey::Reviews(movie.id));
        let before = client.movie_reviews(movie.id).await.into_result().expect("reviews");
        assert_eq!(before.count, 0);

        client
            .create_review(&ReviewInput {
                movie_id: movie.id,
                reviewer_name: "dana".to_string(),
                rating: 9.0,
                comment: None,
            })
            .await
            .expect("review created");

        let refreshed = client.refresh_mounted().await;
        assert_eq!(refreshed.len(), 1);
        match refreshed[0].1.data.as_ref() {
            Some(QueryData::Reviews(list)) => assert_eq!(list.reviews.len(), 1),
            other => panic!("unexpected refresh payload: {other:?}"),
        }
        assert_eq!(backend.calls("movie_reviews"), 2);
    }
}
