//! Display layer: view models and a plain-text renderer.
//!
//! ```text
//! AppState → compute_viewmodel → ViewModel → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable page state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Text renderers per page part
//! - [`helpers`]: Highlighting and text formatting utilities
//! - [`carousel`]: Horizontal scroll state and arrow visibility

pub mod carousel;
pub mod components;
pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use carousel::{CarouselScroll, ScrollDirection};
pub use renderer::{render, render_viewmodel};
pub use viewmodel::{Body, ViewModel};
