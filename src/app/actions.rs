//! Side effects requested by the event handler.
//!
//! The handler never performs I/O. It returns [`Action`]s and the runtime
//! executes them: worker messages are awaited and their responses fed back as
//! events, and tick requests become a timer.
//!
//! # Example
//!
//! ```rust
//! use marquee::app::Action;
//! use marquee::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::LoadGenres)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hands a request to the worker.
    ///
    /// Every response the worker produces comes back as
    /// [`Event::WorkerResponse`](super::Event::WorkerResponse).
    PostToWorker(WorkerMessage),

    /// Asks for an [`Event::Tick`](super::Event::Tick) at or after the instant.
    ///
    /// Used by the search debounce. A later request replaces an earlier one.
    ScheduleTick(Instant),
}
