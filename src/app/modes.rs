//! Which page the application is showing.
//!
//! Search is not a page of its own: a non-blank search term overlays the home
//! page, the same way the catalog's landing page swaps its carousels for grouped
//! results while a term is entered.

use crate::api::{ActorQuery, MovieQuery};
use crate::query::QueryKey;

/// The page currently displayed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// Genre carousels, or grouped search results while a term is active.
    #[default]
    Home,

    /// Infinite-scroll grid of one genre.
    Genre(String),

    /// Movie detail with cast and reviews.
    Movie(i64),

    /// Actor detail with filmography.
    Actor(i64),

    /// Director detail with filmography.
    Director(i64),

    Actors,
    Directors,
    Genres,
}

impl View {
    /// Keys whose failures concern this page.
    ///
    /// Genre pages are not cached reads, so they report failures through the
    /// pagination controller instead.
    #[must_use]
    pub fn keys(&self, home: &MovieQuery) -> Vec<QueryKey> {
        match self {
            Self::Home => vec![QueryKey::Movies(home.clone())],
            Self::Genre(_) => vec![],
            Self::Movie(id) => vec![QueryKey::Movie(*id), QueryKey::Reviews(*id)],
            Self::Actor(id) => vec![QueryKey::Actor(*id)],
            Self::Director(id) => vec![QueryKey::Director(*id)],
            Self::Actors => vec![QueryKey::Actors(ActorQuery::default())],
            Self::Directors => vec![QueryKey::Directors],
            Self::Genres => vec![QueryKey::Genres],
        }
    }

    /// Page heading.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Home => "Marquee".to_string(),
            Self::Genre(name) => format!("{name} Movies"),
            Self::Movie(_) => "Movie".to_string(),
            Self::Actor(_) => "Actor".to_string(),
            Self::Director(_) => "Director".to_string(),
            Self::Actors => "Actors".to_string(),
            Self::Directors => "Directors".to_string(),
            Self::Genres => "Genres".to_string(),
        }
    }
}
