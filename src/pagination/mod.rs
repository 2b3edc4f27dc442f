//! Infinite-scroll pagination for per-genre movie lists.
//!
//! - [`controller`]: [`PaginationController`] state machine and page requests
//! - [`sentinel`]: Intersection test deciding when the sentinel is visible

pub mod controller;
pub mod sentinel;

pub use controller::{PagePhase, PageRequest, PaginationController, PAGE_SIZE};
pub use sentinel::{GridLayout, SentinelObserver, Span, DEFAULT_ROOT_MARGIN, DEFAULT_THRESHOLD};
