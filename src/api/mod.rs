//! REST collaborator: the backend port, its HTTP adapter, and an in-memory stand-in.
//!
//! # Modules
//!
//! - [`backend`]: The [`CatalogBackend`] port trait
//! - [`http`]: reqwest implementation against the live API
//! - [`memory`]: In-memory implementation with call counting and fault injection
//! - [`models`]: Query parameters and response envelopes

pub mod backend;
pub mod http;
pub mod memory;
pub mod models;

pub use backend::CatalogBackend;
pub use http::{HttpBackend, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use memory::MemoryBackend;
pub use models::{
    ActorList, ActorQuery, CategoryList, DirectorList, GenreList, MovieList, MoviePage,
    MovieQuery, ReviewList,
};
