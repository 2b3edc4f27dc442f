//! Request parameters and response envelopes for the catalog REST API.

use crate::domain::{Actor, Category, Director, Genre, Movie, Review};
use serde::{Deserialize, Serialize};

/// Filters for `GET /api/movies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieQuery {
    pub limit_per_genre: Option<u32>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actor: Option<String>,
    pub year: Option<i32>,
}

impl MovieQuery {
    /// Home-page query: every genre, `limit` sample movies each.
    #[must_use]
    pub fn home(limit: u32) -> Self {
        Self {
            limit_per_genre: Some(limit),
            ..Self::default()
        }
    }

    /// Query-string pairs for the parameters that are set.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit_per_genre {
            params.push(("limit_per_genre", limit.to_string()));
        }
        if let Some(genre) = &self.genre {
            params.push(("genre", genre.clone()));
        }
        if let Some(director) = &self.director {
            params.push(("director", director.clone()));
        }
        if let Some(actor) = &self.actor {
            params.push(("actor", actor.clone()));
        }
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        params
    }
}

/// Filters for `GET /api/actors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub genre: Option<String>,
}

impl ActorQuery {
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(genre) = &self.genre {
            params.push(("genre", genre.clone()));
        }
        params
    }
}

/// `{categories, total_categories}` from `GET /api/movies`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub total_categories: u32,
}

/// `{movies, count}` from the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieList {
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub count: u32,
}

/// One page of a genre's movies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorList {
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorList {
    pub directors: Vec<Director>,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewList {
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_filters_are_not_sent() {
        assert!(MovieQuery::default().params().is_empty());

        let query = MovieQuery {
            genre: Some("Drama".to_string()),
            year: Some(1999),
            ..MovieQuery::home(10)
        };
        assert_eq!(
            query.params(),
            vec![
                ("limit_per_genre", "10".to_string()),
                ("genre", "Drama".to_string()),
                ("year", "1999".to_string()),
            ]
        );
    }

    #[test]
    fn page_envelope_decodes() {
        let page: MoviePage =
            serde_json::from_str(r#"{"movies": [], "count": 0, "total": 25, "has_more": true}"#)
                .expect("valid page json");
        assert_eq!(page.total, 25);
        assert!(page.has_more);
    }
}
