//! Movie reviews.

use super::error::{MarqueeError, Result};
use super::movie::check_rating;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A review attached to a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub movie_id: i64,
    pub reviewer_name: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/reviews`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewInput {
    pub movie_id: i64,
    pub reviewer_name: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewInput {
    /// Checks the reviewer name and the rating range.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Validation`] when a field is out of bounds.
    pub fn validate(&self) -> Result<()> {
        if self.reviewer_name.trim().is_empty() {
            return Err(MarqueeError::Validation(
                "Reviewer name is required".to_string(),
            ));
        }
        check_rating(Some(self.rating))
    }
}
