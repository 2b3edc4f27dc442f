//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the outer surface (the CLI in `main.rs`) and the
//! worker. All orchestration follows one unidirectional flow:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`context`]: Shared UI flags (admin mode, form, delete confirmation)
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Which page is displayed
//! - [`runtime`]: Driver executing actions against the worker
//! - [`state`]: Central state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use marquee::app::{handle_event, AppState, Event};
//! use std::time::Duration;
//!
//! let mut state = AppState::new(10, Duration::from_millis(300), true);
//! let (_render, actions) = handle_event(&mut state, &Event::ShowHome(None))?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod context;
pub mod handler;
pub mod modes;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use context::MovieContext;
pub use handler::{handle_event, Event};
pub use modes::View;
pub use runtime::Runtime;
pub use state::{AppState, LoadError};
