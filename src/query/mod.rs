//! Query cache layer between consumers and the REST backend.
//!
//! # Modules
//!
//! - [`tags`]: Entity tags and invalidation matching
//! - [`key`]: Query keys (what a read provides) and mutations (what a write invalidates)
//! - [`cache`]: Shared cache with coalescing, staleness, and subscriptions
//! - [`client`]: Typed [`CatalogClient`] on top of the cache

pub mod cache;
pub mod client;
pub mod key;
pub mod tags;

pub use cache::{QueryCache, QueryData, QueryStatus, Subscription};
pub use client::{CatalogClient, QueryResult};
pub use key::{Mutation, QueryKey};
pub use tags::{EntityKind, Tag};
