//! Worker executing catalog requests against the cached client.
//!
//! Reads keep a subscription per display slot, so the cache knows which keys
//! have mounted consumers. After a successful write the worker re-fetches every
//! stale mounted key and reports those results alongside the write's own.

use crate::domain::{MarqueeError, Result};
use crate::query::{CatalogClient, Mutation, QueryData, QueryKey, QueryResult, Subscription};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::collections::HashMap;
use std::sync::Arc;

/// Display slots a mounted query can occupy. Loading into a slot unmounts
/// whatever was there, and every slot that doesn't belong to the same page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Home,
    Search,
    Detail,
    Reviews,
    List,
}

impl Slot {
    /// Slots shown on the same page as `self` holding `key`.
    fn same_page(self, key: &QueryKey) -> &'static [Self] {
        match (self, key) {
            (Self::Home | Self::Search, _) => &[Self::Home, Self::Search],
            (Self::Detail, QueryKey::Movie(_)) | (Self::Reviews, _) => &[Self::Detail, Self::Reviews],
            (Self::Detail, _) => &[Self::Detail],
            (Self::List, _) => &[Self::List],
        }
    }
}

/// Executes [`WorkerMessage`]s.
#[derive(Debug)]
pub struct CatalogWorker {
    client: CatalogClient,
    mounts: HashMap<Slot, Subscription>,
}

impl CatalogWorker {
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            mounts: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Keys currently mounted, for diagnostics.
    #[must_use]
    pub fn mounted(&self) -> Vec<QueryKey> {
        self.mounts.values().map(|s| s.key().clone()).collect()
    }

    /// Drops subscriptions of pages other than the one `slot` belongs to.
    fn leave_other_pages(&mut self, slot: Slot, key: &QueryKey) {
        let page = slot.same_page(key);
        self.mounts.retain(|mounted, subscription| {
            let keep = page.contains(mounted);
            if !keep {
                tracing::debug!(key = %subscription.key(), "unmounting query of previous page");
            }
            keep
        });
    }

    fn mount(&mut self, slot: Slot, key: &QueryKey) {
        self.leave_other_pages(slot, key);
        let already = self.mounts.get(&slot).is_some_and(|s| s.key() == key);
        if !already {
            self.mounts.insert(slot, self.client.subscribe(key.clone()));
        }
    }

    /// Logs a write outcome and converts it with `on_success`.
    fn handle_write<T, F>(mutation: Mutation, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(mutation = ?mutation, "write successful");
                on_success(value)
            }
            Err(error) => {
                tracing::warn!(mutation = ?mutation, error = %error, "write failed");
                WorkerResponse::WriteFailed {
                    mutation,
                    message: error.user_message(),
                }
            }
        }
    }

    /// Maps a settled read of `key` to the response a consumer of that key expects.
    fn response_for(key: &QueryKey, result: QueryResult<QueryData>) -> Option<WorkerResponse> {
        let target = key.to_string();
        let data = match result.into_result() {
            Ok(data) => data,
            Err(error) => return Some(Self::failure_for(key, &error)),
        };

        let response = match (key, data) {
            (QueryKey::Movies(query), QueryData::Categories(list)) => WorkerResponse::HomeLoaded {
                query: query.clone(),
                categories: list.categories,
            },
            (QueryKey::Search(term), QueryData::Movies(list)) => WorkerResponse::SearchCompleted {
                term: term.clone(),
                movies: list.movies,
            },
            (QueryKey::Movie(_), QueryData::Movie(movie)) => WorkerResponse::MovieLoaded { movie },
            (QueryKey::Reviews(movie_id), QueryData::Reviews(list)) => {
                WorkerResponse::ReviewsLoaded {
                    movie_id: *movie_id,
                    reviews: list.reviews,
                }
            }
            (QueryKey::Actor(_), QueryData::Actor(actor)) => WorkerResponse::ActorLoaded { actor },
            (QueryKey::Director(_), QueryData::Director(director)) => {
                WorkerResponse::DirectorLoaded { director }
            }
            (QueryKey::Actors(_), QueryData::Actors(list)) => WorkerResponse::ActorsLoaded {
                actors: list.actors,
            },
            (QueryKey::Directors, QueryData::Directors(list)) => WorkerResponse::DirectorsLoaded {
                directors: list.directors,
            },
            (QueryKey::Genres, QueryData::Genres(list)) => WorkerResponse::GenresLoaded {
                genres: list.genres,
            },
            (key, data) => {
                tracing::debug!(key = %key, data = ?std::mem::discriminant(&data), "no response mapping for key");
                return None;
            }
        };

        tracing::debug!(target = %target, "read successful");
        Some(response)
    }

    fn failure_for(key: &QueryKey, error: &Arc<MarqueeError>) -> WorkerResponse {
        tracing::warn!(key = %key, error = %error, "read failed");
        match key {
            QueryKey::Search(term) => WorkerResponse::SearchFailed {
                term: term.clone(),
                message: error.user_message(),
            },
            _ => WorkerResponse::LoadFailed {
                target: key.to_string(),
                message: error.user_message(),
                not_found: error.is_not_found(),
            },
        }
    }

    async fn load(&mut self, slot: Slot, key: QueryKey) -> Vec<WorkerResponse> {
        self.mount(slot, &key);
        let result = self.client.read(&key).await;
        Self::response_for(&key, result).into_iter().collect()
    }

    /// Re-fetches stale mounted keys after a write.
    async fn refresh_mounted(&self) -> Vec<WorkerResponse> {
        self.client
            .refresh_mounted()
            .await
            .into_iter()
            .filter_map(|(key, result)| Self::response_for(&key, result))
            .collect()
    }

    async fn after_write(&self, response: WorkerResponse) -> Vec<WorkerResponse> {
        let mut responses = vec![response];
        if !matches!(responses[0], WorkerResponse::WriteFailed { .. }) {
            responses.extend(self.refresh_mounted().await);
        }
        responses
    }

    /// Processes one request.
    ///
    /// The first response answers the request itself; writes may append
    /// responses for mounted queries they refreshed.
    pub async fn handle_message(&mut self, message: WorkerMessage) -> Vec<WorkerResponse> {
        tracing::debug!(message = ?message, "worker handling message");

        match message {
            WorkerMessage::LoadHome { query } => self.load(Slot::Home, QueryKey::Movies(query)).await,
            WorkerMessage::Search { term } => self.load(Slot::Search, QueryKey::Search(term)).await,
            WorkerMessage::LoadMovie { id } => self.load(Slot::Detail, QueryKey::Movie(id)).await,
            WorkerMessage::LoadReviews { movie_id } => {
                self.load(Slot::Reviews, QueryKey::Reviews(movie_id)).await
            }
            WorkerMessage::LoadActor { id } => self.load(Slot::Detail, QueryKey::Actor(id)).await,
            WorkerMessage::LoadDirector { id } => {
                self.load(Slot::Detail, QueryKey::Director(id)).await
            }
            WorkerMessage::LoadActors { query } => {
                self.load(Slot::List, QueryKey::Actors(query)).await
            }
            WorkerMessage::LoadDirectors => self.load(Slot::List, QueryKey::Directors).await,
            WorkerMessage::LoadGenres => self.load(Slot::List, QueryKey::Genres).await,

            WorkerMessage::LoadPage { request } => {
                // Genre pages read through the cache without mounting anything.
                if !self.mounts.is_empty() {
                    tracing::debug!(mounted = self.mounts.len(), "unmounting queries for genre page");
                    self.mounts.clear();
                }
                let target = format!("genre/{}?offset={}", request.genre, request.offset);
                let result = self
                    .client
                    .movies_by_genre(&request.genre, request.limit, request.offset)
                    .await;
                let response = match result.into_result() {
                    Ok(page) => WorkerResponse::PageLoaded { request, page },
                    Err(error) => {
                        tracing::warn!(target = %target, error = %error, "page load failed");
                        WorkerResponse::PageFailed {
                            request,
                            message: error.user_message(),
                        }
                    }
                };
                vec![response]
            }

            WorkerMessage::CreateMovie { input } => {
                let result = self.client.create_movie(&input).await;
                let response = Self::handle_write(Mutation::CreateMovie, result, |movie| {
                    WorkerResponse::MovieSaved {
                        movie,
                        created: true,
                    }
                });
                self.after_write(response).await
            }
            WorkerMessage::UpdateMovie { id, update } => {
                let result = self.client.update_movie(id, &update).await;
                let response = Self::handle_write(Mutation::UpdateMovie(id), result, |movie| {
                    WorkerResponse::MovieSaved {
                        movie,
                        created: false,
                    }
                });
                self.after_write(response).await
            }
            WorkerMessage::DeleteMovie { id } => {
                let result = self.client.delete_movie(id).await;
                if result.is_ok() && self.mounts.get(&Slot::Detail).map(Subscription::key) == Some(&QueryKey::Movie(id)) {
                    self.mounts.remove(&Slot::Detail);
                    self.mounts.remove(&Slot::Reviews);
                }
                let response = Self::handle_write(Mutation::DeleteMovie(id), result, |()| {
                    WorkerResponse::MovieDeleted { id }
                });
                self.after_write(response).await
            }
            WorkerMessage::CreateReview { input } => {
                let result = self.client.create_review(&input).await;
                let response = Self::handle_write(Mutation::CreateReview, result, |review| {
                    WorkerResponse::ReviewCreated { review }
                });
                self.after_write(response).await
            }
        }
    }
}
