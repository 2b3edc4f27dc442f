//! Worker executing requests that need network I/O.
//!
//! The application layer never touches the backend directly. It emits
//! [`WorkerMessage`]s, the runtime hands them to [`CatalogWorker`], and every
//! [`WorkerResponse`] comes back as an event.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Worker implementation over the cached catalog client

pub mod handler;
pub mod messages;

pub use handler::CatalogWorker;
pub use messages::{WorkerMessage, WorkerResponse};
