//! reqwest-backed implementation of [`CatalogBackend`].

use super::backend::CatalogBackend;
use super::models::{
    ActorList, ActorQuery, CategoryList, DirectorList, GenreList, MovieList, MoviePage,
    MovieQuery, ReviewList,
};
use crate::domain::{
    Actor, Director, MarqueeError, Movie, MovieInput, MovieUpdate, Result, Review, ReviewInput,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default backend location when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the catalog REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Config`] when `base_url` is not an absolute http(s) URL
    /// or the HTTP client can't be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| MarqueeError::Config(format!("invalid API URL {trimmed:?}: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(MarqueeError::Config(format!(
                "API URL must be http(s): {trimmed:?}"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarqueeError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// The URL every endpoint path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL; each segment is percent-encoded on its own, so a
    /// search term containing `/` stays a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(MarqueeError::from)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        entity: Option<(&'static str, i64)>,
    ) -> Result<T> {
        let response = self.send(request).await?;
        let response = check_status(response, entity).await?;
        response.json::<T>().await.map_err(MarqueeError::from)
    }

    /// Single-entity fetch; a 404 or a `null` body both mean not found.
    async fn fetch_entity<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        entity: &'static str,
        id: i64,
    ) -> Result<T> {
        let response = self.send(request).await?;
        let response = check_status(response, Some((entity, id))).await?;
        let body = response.text().await.map_err(MarqueeError::from)?;
        decode_entity(&body, entity, id)
    }
}

fn decode_entity<T: DeserializeOwned>(body: &str, entity: &'static str, id: i64) -> Result<T> {
    if body.trim().is_empty() {
        return Err(MarqueeError::NotFound { entity, id });
    }
    serde_json::from_str::<Option<T>>(body)?.ok_or(MarqueeError::NotFound { entity, id })
}

/// Turns a non-2xx response into an error, keeping the server's `detail`.
async fn check_status(response: Response, entity: Option<(&'static str, i64)>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some((entity, id)) = entity {
            return Err(MarqueeError::NotFound { entity, id });
        }
    }

    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    tracing::debug!(status = status.as_u16(), detail = ?detail, "backend rejected request");
    Err(MarqueeError::Status {
        status: status.as_u16(),
        detail,
    })
}

/// Pulls a human-readable message out of an error body.
///
/// FastAPI sends `{"detail": "text"}` for handled errors and
/// `{"detail": [{"msg": "..."}, ...]}` for request validation failures.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[async_trait]
impl CatalogBackend for HttpBackend {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_movies(&self, query: &MovieQuery) -> Result<CategoryList> {
        let url = self.endpoint(&["api", "movies"]);
        self.fetch(self.client.get(url).query(&query.params()), None)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_movie(&self, id: i64) -> Result<Movie> {
        let url = self.endpoint(&["api", "movies", &id.to_string()]);
        self.fetch_entity(self.client.get(url), "movie", id).await
    }

    #[tracing::instrument(level = "debug", skip(self, input), fields(title = %input.title))]
    async fn create_movie(&self, input: &MovieInput) -> Result<Movie> {
        let url = self.endpoint(&["api", "movies"]);
        self.fetch(self.client.post(url).json(input), None).await
    }

    #[tracing::instrument(level = "debug", skip(self, update))]
    async fn update_movie(&self, id: i64, update: &MovieUpdate) -> Result<Movie> {
        let url = self.endpoint(&["api", "movies", &id.to_string()]);
        self.fetch(self.client.put(url).json(update), Some(("movie", id)))
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_movie(&self, id: i64) -> Result<()> {
        let url = self.endpoint(&["api", "movies", &id.to_string()]);
        let response = self.send(self.client.delete(url)).await?;
        check_status(response, Some(("movie", id))).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn search_movies(&self, term: &str) -> Result<MovieList> {
        let url = self.endpoint(&["api", "movies", "search", term]);
        self.fetch(self.client.get(url), None).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn movies_by_genre(&self, genre: &str, limit: u32, offset: u32) -> Result<MoviePage> {
        let url = self.endpoint(&["api", "movies", "genre", genre]);
        let params = [("limit", limit), ("offset", offset)];
        self.fetch(self.client.get(url).query(&params), None).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_actors(&self, query: &ActorQuery) -> Result<ActorList> {
        let url = self.endpoint(&["api", "actors"]);
        self.fetch(self.client.get(url).query(&query.params()), None)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_actor(&self, id: i64) -> Result<Actor> {
        let url = self.endpoint(&["api", "actors", &id.to_string()]);
        self.fetch_entity(self.client.get(url), "actor", id).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_directors(&self) -> Result<DirectorList> {
        let url = self.endpoint(&["api", "directors"]);
        self.fetch(self.client.get(url), None).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_director(&self, id: i64) -> Result<Director> {
        let url = self.endpoint(&["api", "directors", &id.to_string()]);
        self.fetch_entity(self.client.get(url), "director", id).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_genres(&self) -> Result<GenreList> {
        let url = self.endpoint(&["api", "genres"]);
        self.fetch(self.client.get(url), None).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn movie_reviews(&self, movie_id: i64) -> Result<ReviewList> {
        let url = self.endpoint(&["api", "movies", &movie_id.to_string(), "reviews"]);
        self.fetch(self.client.get(url), None).await
    }

    #[tracing::instrument(level = "debug", skip(self, input), fields(movie_id = input.movie_id))]
    async fn create_review(&self, input: &ReviewInput) -> Result<Review> {
        let url = self.endpoint(&["api", "reviews"]);
        self.fetch(self.client.post(url).json(input), None).await
    }
}
