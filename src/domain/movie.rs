//! Movie domain model and write payloads.
//!
//! [`Movie`] is the read model returned by the backend. [`MovieInput`] and
//! [`MovieUpdate`] are the create and partial-update bodies; both validate locally
//! before anything is sent so that obviously bad forms fail without a round trip.

use super::error::{MarqueeError, Result};
use super::people::Actor;
use super::review::Review;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Genre bucket used when a movie arrives without a genre name.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Earliest release year the form accepts.
pub const MIN_RELEASE_YEAR: i32 = 1888;

/// Latest release year the form accepts.
pub const MAX_RELEASE_YEAR: i32 = 2100;

/// Upper bound of the rating scale (inclusive). The lower bound is zero.
pub const MAX_RATING: f64 = 10.0;

/// Returns true when `rating` lies on the 0–10 scale.
#[must_use]
pub fn is_valid_rating(rating: f64) -> bool {
    rating.is_finite() && (0.0..=MAX_RATING).contains(&rating)
}

/// A movie as returned by the catalog backend.
///
/// `cast` and `reviews` are only embedded by the single-movie endpoint; list
/// endpoints leave them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    /// Director display name.
    #[serde(default)]
    pub director: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director_id: Option<i64>,
    pub release_year: i32,
    /// Genre display name. `None` when the backend sent null or omitted it.
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<Actor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

impl Movie {
    /// Genre name for grouping, with [`UNKNOWN_GENRE`] standing in for a missing one.
    #[must_use]
    pub fn genre_name(&self) -> &str {
        self.genre.as_deref().unwrap_or(UNKNOWN_GENRE)
    }

    /// Short text for cards: the description, or a director credit when there is none.
    #[must_use]
    pub fn blurb(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => format!("Directed by {}", self.director),
        }
    }
}

/// One credited actor in a create or update body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastInput {
    pub actor_name: String,
    pub role: String,
}

/// Body of `POST /api/movies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieInput {
    pub title: String,
    pub director_name: String,
    pub release_year: i32,
    pub genre_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<CastInput>>,
}

impl MovieInput {
    /// Creates an input with the required fields and nothing else.
    pub fn new(
        title: impl Into<String>,
        director_name: impl Into<String>,
        release_year: i32,
        genre_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            director_name: director_name.into(),
            release_year,
            genre_name: genre_name.into(),
            rating: None,
            description: None,
            language: None,
            image_url: None,
            cast: None,
        }
    }

    /// Pre-fills an edit form from an existing movie.
    #[must_use]
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            director_name: movie.director.clone(),
            release_year: movie.release_year,
            genre_name: movie.genre.clone().unwrap_or_default(),
            rating: movie.rating,
            description: movie.description.clone(),
            language: movie.language.clone(),
            image_url: movie.image_url.clone(),
            cast: movie.cast.as_ref().map(|cast| {
                cast.iter()
                    .map(|actor| CastInput {
                        actor_name: actor.name.clone(),
                        role: actor.role.clone().unwrap_or_default(),
                    })
                    .collect()
            }),
        }
    }

    /// Checks required fields and value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        require_text("Title", &self.title)?;
        require_text("Director", &self.director_name)?;
        require_text("Genre", &self.genre_name)?;
        check_year(self.release_year)?;
        check_rating(self.rating)?;
        if let Some(cast) = &self.cast {
            for entry in cast {
                require_text("Actor name", &entry.actor_name)?;
            }
        }
        Ok(())
    }
}

/// Body of `PUT /api/movies/{id}`; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<CastInput>>,
}

impl MovieUpdate {
    /// True when the update would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.director_name.is_none()
            && self.release_year.is_none()
            && self.genre_name.is_none()
            && self.rating.is_none()
            && self.description.is_none()
            && self.language.is_none()
            && self.image_url.is_none()
            && self.cast.is_none()
    }

    /// Checks the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require_text("Title", title)?;
        }
        if let Some(director) = &self.director_name {
            require_text("Director", director)?;
        }
        if let Some(genre) = &self.genre_name {
            require_text("Genre", genre)?;
        }
        if let Some(year) = self.release_year {
            check_year(year)?;
        }
        check_rating(self.rating)
    }
}

impl From<MovieInput> for MovieUpdate {
    fn from(input: MovieInput) -> Self {
        Self {
            title: Some(input.title),
            director_name: Some(input.director_name),
            release_year: Some(input.release_year),
            genre_name: Some(input.genre_name),
            rating: input.rating,
            description: input.description,
            language: input.language,
            image_url: input.image_url,
            cast: input.cast,
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MarqueeError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn check_year(year: i32) -> Result<()> {
    if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year) {
        return Err(MarqueeError::Validation(format!(
            "Release year must be between {MIN_RELEASE_YEAR} and {MAX_RELEASE_YEAR}"
        )));
    }
    Ok(())
}

pub(crate) fn check_rating(rating: Option<f64>) -> Result<()> {
    match rating {
        Some(value) if !is_valid_rating(value) => Err(MarqueeError::Validation(
            "Rating must be between 0 and 10".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": 7,
            "title": "Heat",
            "director": "Michael Mann",
            "release_year": 1995,
            "genre": null,
            "rating": 8.3,
            "created_at": "2024-01-02T03:04:05"
        }"#
    }

    #[test]
    fn null_genre_deserializes_to_unknown_bucket() {
        let movie: Movie = serde_json::from_str(sample_json()).expect("valid movie json");
        assert_eq!(movie.genre, None);
        assert_eq!(movie.genre_name(), UNKNOWN_GENRE);
        assert!(movie.cast.is_none());
    }

    #[test]
    fn blurb_falls_back_to_director_credit() {
        let mut movie: Movie = serde_json::from_str(sample_json()).expect("valid movie json");
        assert_eq!(movie.blurb(), "Directed by Michael Mann");

        movie.description = Some("A heist goes wrong.".to_string());
        assert_eq!(movie.blurb(), "A heist goes wrong.");
    }

    #[test]
    fn input_validation_rejects_out_of_range_rating() {
        let mut input = MovieInput::new("Heat", "Michael Mann", 1995, "Crime");
        assert!(input.validate().is_ok());

        input.rating = Some(10.5);
        let err = input.validate().expect_err("rating above scale");
        assert_eq!(err.user_message(), "Rating must be between 0 and 10");
    }

    #[test]
    fn input_validation_requires_title() {
        let input = MovieInput::new("  ", "Michael Mann", 1995, "Crime");
        let err = input.validate().expect_err("blank title");
        assert_eq!(err.user_message(), "Title is required");
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let update = MovieUpdate {
            rating: Some(9.0),
            ..MovieUpdate::default()
        };
        let body = serde_json::to_value(&update).expect("serializable");
        assert_eq!(body, serde_json::json!({ "rating": 9.0 }));
        assert!(!update.is_empty());
        assert!(MovieUpdate::default().is_empty());
    }

    #[test]
    fn edit_form_prefill_round_trips_required_fields() {
        let movie: Movie = serde_json::from_str(sample_json()).expect("valid movie json");
        let input = MovieInput::from_movie(&movie);
        assert_eq!(input.title, "Heat");
        assert_eq!(input.director_name, "Michael Mann");
        assert_eq!(input.genre_name, "");
        assert_eq!(input.rating, Some(8.3));
    }
}
