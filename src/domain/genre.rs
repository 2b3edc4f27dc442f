//! Genres and the home-page category aggregate.

use super::movie::Movie;
use serde::{Deserialize, Serialize};

/// A genre.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A genre with its total movie count and a bounded sample of its movies.
///
/// Categories are read-only projections computed by the backend; they back the
/// home-page carousels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub genre_id: i64,
    pub genre_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_description: Option<String>,
    #[serde(default)]
    pub movie_count: u32,
    #[serde(default)]
    pub movies: Vec<Movie>,
}

impl Category {
    /// True when the category has nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
