//! Domain layer for the catalog client.
//!
//! This module contains the entity types returned by the catalog backend, the write
//! payloads sent to it, and the crate-wide error type. Nothing here performs I/O.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie read model and create/update payloads
//! - [`people`]: Actors and directors
//! - [`genre`]: Genres and home-page categories
//! - [`review`]: Reviews and the review payload
//! - [`timestamp`]: Serde helpers for backend timestamps
//!
//! # Examples
//!
//! ```
//! use marquee::domain::{MovieInput, Result};
//!
//! fn draft() -> Result<MovieInput> {
//!     let input = MovieInput::new("Heat", "Michael Mann", 1995, "Crime");
//!     input.validate()?;
//!     Ok(input)
//! }
//! # draft().unwrap();
//! ```

pub mod error;
pub mod genre;
pub mod movie;
pub mod people;
pub mod review;
pub mod timestamp;

pub use error::{MarqueeError, Result, GENERIC_ERROR_MESSAGE};
pub use genre::{Category, Genre};
pub use movie::{CastInput, Movie, MovieInput, MovieUpdate, UNKNOWN_GENRE};
pub use people::{Actor, Director};
pub use review::{Review, ReviewInput};
