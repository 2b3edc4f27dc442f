//! Driver executing actions and feeding results back as events.
//!
//! [`Runtime`] owns the state, the worker and a queue of pending events.
//! [`Runtime::dispatch`] processes an event and everything it causes until the
//! queue is empty: worker messages are awaited in order and their responses
//! queued behind. Debounce ticks are kept aside and fired by
//! [`Runtime::run_until_idle`] using the tokio clock, so tests running with
//! paused time advance through the debounce window instantly.

use super::handler::{handle_event, Event};
use super::{Action, AppState};
use crate::domain::Result;
use crate::worker::CatalogWorker;
use std::collections::VecDeque;
use std::time::Instant;

#[derive(Debug)]
pub struct Runtime {
    state: AppState,
    worker: CatalogWorker,
    queue: VecDeque<Event>,
    tick: Option<Instant>,
}

impl Runtime {
    #[must_use]
    pub fn new(state: AppState, worker: CatalogWorker) -> Self {
        Self {
            state,
            worker,
            queue: VecDeque::new(),
            tick: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    #[must_use]
    pub const fn worker(&self) -> &CatalogWorker {
        &self.worker
    }

    /// Current time on the tokio clock, as a std instant.
    #[must_use]
    pub fn now() -> Instant {
        tokio::time::Instant::now().into_std()
    }

    /// When the next scheduled tick is due.
    #[must_use]
    pub const fn pending_tick(&self) -> Option<Instant> {
        self.tick
    }

    /// Processes `event` and every event it causes.
    ///
    /// Returns whether any of them asked for a render.
    ///
    /// # Errors
    ///
    /// Propagates handler errors; the queue is cleared so a later dispatch
    /// starts fresh.
    pub async fn dispatch(&mut self, event: Event) -> Result<bool> {
        self.queue.push_back(event);
        let mut render = false;

        while let Some(event) = self.queue.pop_front() {
            let (changed, actions) = match handle_event(&mut self.state, &event) {
                Ok(outcome) => outcome,
                Err(error) => {
                    self.queue.clear();
                    return Err(error);
                }
            };
            render |= changed;

            for action in actions {
                self.execute(action).await;
            }
        }

        Ok(render)
    }

    async fn execute(&mut self, action: Action) {
        match action {
            Action::PostToWorker(message) => {
                let responses = self.worker.handle_message(message).await;
                self.queue
                    .extend(responses.into_iter().map(Event::WorkerResponse));
            }
            Action::ScheduleTick(at) => {
                tracing::trace!(?at, "tick scheduled");
                self.tick = Some(at);
            }
        }
    }

    /// Fires scheduled ticks until none remain.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Runtime::dispatch`].
    pub async fn run_until_idle(&mut self) -> Result<bool> {
        let mut render = false;
        while let Some(at) = self.tick.take() {
            tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await;
            render |= self.dispatch(Event::Tick(Self::now())).await?;
        }
        Ok(render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryBackend;
    use crate::query::CatalogClient;
    use crate::search::SearchPhase;
    use std::sync::Arc;
    use std::time::Duration;

    fn runtime(backend: &Arc<MemoryBackend>) -> Runtime {
        Runtime::new(
            AppState::new(10, Duration::from_millis(300), true),
            CatalogWorker::new(CatalogClient::new(backend.clone())),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn typing_burst_searches_once() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_movie("The Matrix", "Wachowski", 1999, Some("Sci-Fi"));
        let mut rt = runtime(&backend);

        for text in ["m", "ma", "mat", "matrix"] {
            rt.dispatch(Event::SearchInput {
                text: text.to_string(),
                at: Runtime::now(),
            })
            .await
            .unwrap();
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        assert_eq!(backend.calls("search_movies"), 0);

        rt.run_until_idle().await.unwrap();
        assert_eq!(backend.calls("search_movies"), 1);
        assert!(matches!(rt.state().search.phase(), SearchPhase::Results(groups) if groups.len() == 1));
    }

    #[tokio::test]
    async fn show_movie_loads_detail_and_reviews() {
        let backend = Arc::new(MemoryBackend::new());
        let heat = backend.insert_movie("Heat", "Michael Mann", 1995, Some("Crime"));
        let mut rt = runtime(&backend);

        let render = rt.dispatch(Event::ShowMovie(heat.id)).await.unwrap();
        assert!(render);
        assert_eq!(rt.state().movie.as_ref().map(|m| m.id), Some(heat.id));
        assert_eq!(rt.state().reviews.as_deref().map(<[_]>::len), Some(0));
    }
}
