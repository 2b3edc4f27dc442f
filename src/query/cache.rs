//! Process-wide query cache with request coalescing and tag invalidation.
//!
//! Every read goes through [`QueryCache::fetch`] under a [`QueryKey`]. The cache
//! holds, per key, the last settled value and at most one joinable in-flight
//! request. Identical concurrent reads share that request. Invalidation marks
//! entries stale and bumps their generation, so a request that was in flight when
//! its tags were invalidated can no longer be joined and its result is not stored.
//!
//! The handle is cheap to clone; all clones share state.

use super::key::QueryKey;
use super::tags::Tag;
use crate::api::{
    ActorList, CategoryList, DirectorList, GenreList, MovieList, MoviePage, ReviewList,
};
use crate::domain::{Actor, Director, MarqueeError, Movie, Result};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Payload of a cached read.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Categories(CategoryList),
    Movie(Movie),
    Movies(MovieList),
    Page(MoviePage),
    Actors(ActorList),
    Actor(Actor),
    Directors(DirectorList),
    Director(Director),
    Genres(GenreList),
    Reviews(ReviewList),
}

/// Settled outcome shared between every caller of one request.
pub type SharedResult = std::result::Result<Arc<QueryData>, Arc<MarqueeError>>;

type InFlight = Shared<BoxFuture<'static, SharedResult>>;

/// Lifecycle of a key as seen by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Never requested.
    Uninitialized,
    /// First request in flight, nothing to show yet.
    Loading,
    /// Data available (possibly stale, possibly being refreshed).
    Success,
    /// Last request failed and no data is held.
    Error,
}

struct Entry {
    data: Option<Arc<QueryData>>,
    error: Option<Arc<MarqueeError>>,
    in_flight: Option<(u64, InFlight)>,
    generation: u64,
    stale: bool,
    subscribers: usize,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("status", &self.status())
            .field("generation", &self.generation)
            .field("in_flight", &self.in_flight.as_ref().map(|(generation, _)| generation))
            .field("stale", &self.stale)
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

impl Entry {
    const fn new() -> Self {
        Self {
            data: None,
            error: None,
            in_flight: None,
            generation: 0,
            stale: false,
            subscribers: 0,
        }
    }

    fn status(&self) -> QueryStatus {
        if self.data.is_some() {
            QueryStatus::Success
        } else if self.in_flight.is_some() {
            QueryStatus::Loading
        } else if self.error.is_some() {
            QueryStatus::Error
        } else {
            QueryStatus::Uninitialized
        }
    }

    /// The in-flight request, unless an invalidation has superseded it.
    fn joinable(&self) -> Option<InFlight> {
        self.in_flight
            .as_ref()
            .filter(|(generation, _)| *generation == self.generation)
            .map(|(_, request)| request.clone())
    }

    fn mark_stale(&mut self) {
        self.stale = true;
        self.generation += 1;
    }
}

type Entries = Arc<Mutex<HashMap<QueryKey, Entry>>>;

fn lock(entries: &Entries) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared cache handle.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: Entries,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, issuing `request` only when needed.
    ///
    /// - fresh data is returned without touching the network;
    /// - a joinable in-flight request is awaited instead of starting another;
    /// - otherwise (no data, stale data, or a previous failure) `request` runs.
    ///
    /// `request` is dropped unpolled when it is not needed.
    pub async fn fetch(
        &self,
        key: &QueryKey,
        request: BoxFuture<'static, Result<QueryData>>,
    ) -> SharedResult {
        let pending = {
            let mut entries = lock(&self.entries);
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);

            if let Some(request) = entry.joinable() {
                tracing::debug!(key = %key, "joining in-flight request");
                request
            } else {
                if !entry.stale {
                    if let Some(data) = entry.data.clone() {
                        tracing::trace!(key = %key, "cache hit");
                        return Ok(data);
                    }
                }

                entry.generation += 1;
                let generation = entry.generation;
                tracing::debug!(key = %key, generation, stale = entry.stale, "issuing request");

                let entries = Arc::clone(&self.entries);
                let owned_key = key.clone();
                let request = async move {
                    let result: SharedResult = request.await.map(Arc::new).map_err(Arc::new);
                    settle(&entries, &owned_key, generation, &result);
                    result
                }
                .boxed()
                .shared();

                entry.in_flight = Some((generation, request.clone()));
                request
            }
        };

        pending.await
    }

    /// Marks every entry providing a tag matched by `tags` as stale.
    ///
    /// Returns the stale keys that still have mounted consumers; those should be
    /// re-fetched now. Unmounted entries are re-fetched on their next access.
    pub fn invalidate(&self, tags: &[Tag]) -> Vec<QueryKey> {
        let mut entries = lock(&self.entries);
        let mut mounted = Vec::new();
        for (key, entry) in entries.iter_mut() {
            if key.is_invalidated_by(tags) {
                entry.mark_stale();
                if entry.subscribers > 0 {
                    mounted.push(key.clone());
                }
            }
        }
        tracing::debug!(
            tags = %tags.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
            mounted = mounted.len(),
            "invalidated cache tags"
        );
        mounted
    }

    /// Marks a single key stale so its next fetch goes to the backend.
    pub fn invalidate_key(&self, key: &QueryKey) {
        if let Some(entry) = lock(&self.entries).get_mut(key) {
            entry.mark_stale();
        }
    }

    /// Stale keys that currently have mounted consumers.
    #[must_use]
    pub fn stale_mounted(&self) -> Vec<QueryKey> {
        lock(&self.entries)
            .iter()
            .filter(|(_, entry)| entry.stale && entry.subscribers > 0)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Mounts a consumer on `key` until the returned guard drops.
    #[must_use]
    pub fn subscribe(&self, key: QueryKey) -> Subscription {
        lock(&self.entries)
            .entry(key.clone())
            .or_insert_with(Entry::new)
            .subscribers += 1;
        Subscription {
            cache: self.clone(),
            key,
        }
    }

    #[must_use]
    pub fn status(&self, key: &QueryKey) -> QueryStatus {
        lock(&self.entries)
            .get(key)
            .map_or(QueryStatus::Uninitialized, Entry::status)
    }

    /// Whether a request for `key` is currently outstanding.
    #[must_use]
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        lock(&self.entries)
            .get(key)
            .is_some_and(|entry| entry.in_flight.is_some())
    }

    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        lock(&self.entries).get(key).is_some_and(|entry| entry.stale)
    }

    /// Cached value without fetching.
    #[must_use]
    pub fn peek(&self, key: &QueryKey) -> Option<Arc<QueryData>> {
        lock(&self.entries)
            .get(key)
            .and_then(|entry| entry.data.clone())
    }

    /// Number of mounted consumers for `key`.
    #[must_use]
    pub fn subscribers(&self, key: &QueryKey) -> usize {
        lock(&self.entries)
            .get(key)
            .map_or(0, |entry| entry.subscribers)
    }
}

/// Stores a settled result unless the entry moved on to a newer generation.
fn settle(entries: &Entries, key: &QueryKey, generation: u64, result: &SharedResult) {
    let mut entries = lock(entries);
    let Some(entry) = entries.get_mut(key) else {
        return;
    };

    if entry
        .in_flight
        .as_ref()
        .is_some_and(|(in_flight, _)| *in_flight == generation)
    {
        entry.in_flight = None;
    }

    if entry.generation != generation {
        tracing::debug!(key = %key, generation, current = entry.generation, "discarding superseded result");
        return;
    }

    entry.stale = false;
    match result {
        Ok(data) => {
            entry.data = Some(Arc::clone(data));
            entry.error = None;
        }
        Err(error) => {
            tracing::debug!(key = %key, error = %error, "read failed");
            entry.data = None;
            entry.error = Some(Arc::clone(error));
        }
    }
}

/// Guard representing one mounted consumer of a key.
#[derive(Debug)]
pub struct Subscription {
    cache: QueryCache,
    key: QueryKey,
}

impl Subscription {
    #[must_use]
    pub const fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(entry) = lock(&self.cache.entries).get_mut(&self.key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
        }
    }
}
