//! Actor and director models.

use super::movie::Movie;
use serde::{Deserialize, Serialize};

/// An actor.
///
/// `role` is only set when the actor appears as part of a movie's cast. `movies`
/// and `movie_count` are only set by the single-actor endpoint (filmography).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movies: Option<Vec<Movie>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_count: Option<u32>,
}

/// A director. Same shape as [`Actor`] without a per-movie role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Director {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movies: Option<Vec<Movie>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_member_carries_role() {
        let actor: Actor = serde_json::from_str(
            r#"{"id": 3, "name": "Al Pacino", "role": "Vincent Hanna"}"#,
        )
        .expect("valid actor json");
        assert_eq!(actor.role.as_deref(), Some("Vincent Hanna"));
        assert!(actor.movies.is_none());
    }

    #[test]
    fn filmography_is_embedded() {
        let director: Director = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Michael Mann",
                "movie_count": 1,
                "movies": [{
                    "id": 7, "title": "Heat", "director": "Michael Mann",
                    "release_year": 1995, "genre": "Crime",
                    "created_at": "2024-01-02T03:04:05Z"
                }]
            }"#,
        )
        .expect("valid director json");
        assert_eq!(director.movie_count, Some(1));
        assert_eq!(director.movies.map(|m| m.len()), Some(1));
    }
}
