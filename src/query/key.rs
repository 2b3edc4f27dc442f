//! Query keys and mutations with their tag declarations.

use super::tags::{EntityKind, Tag};
use crate::api::{ActorQuery, MovieQuery};
use std::fmt;

/// Identity of a cached read: operation plus parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Genre-grouped movie listing (home carousels).
    Movies(MovieQuery),
    Movie(i64),
    Search(String),
    GenrePage {
        genre: String,
        limit: u32,
        offset: u32,
    },
    Actors(ActorQuery),
    Actor(i64),
    Directors,
    Director(i64),
    Genres,
    Reviews(i64),
}

impl QueryKey {
    /// Tags this read provides.
    #[must_use]
    pub fn provides(&self) -> Vec<Tag> {
        use EntityKind::{Actor, Director, Genre, Movie, Review};

        match self {
            Self::Movies(_) | Self::Search(_) | Self::GenrePage { .. } => vec![Tag::of(Movie)],
            Self::Movie(id) => vec![Tag::entity(Movie, *id)],
            Self::Actors(_) => vec![Tag::of(Actor)],
            Self::Actor(id) => vec![Tag::entity(Actor, *id)],
            Self::Directors => vec![Tag::of(Director)],
            Self::Director(id) => vec![Tag::entity(Director, *id)],
            Self::Genres => vec![Tag::of(Genre)],
            Self::Reviews(movie_id) => vec![Tag::entity(Review, *movie_id)],
        }
    }

    /// Whether any of `tags` makes this read stale.
    #[must_use]
    pub fn is_invalidated_by(&self, tags: &[Tag]) -> bool {
        let provided = self.provides();
        tags.iter()
            .any(|tag| provided.iter().any(|held| tag.invalidates(held)))
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movies(query) => write!(f, "movies{:?}", query.params()),
            Self::Movie(id) => write!(f, "movie/{id}"),
            Self::Search(term) => write!(f, "search/{term}"),
            Self::GenrePage {
                genre,
                limit,
                offset,
            } => write!(f, "genre/{genre}?limit={limit}&offset={offset}"),
            Self::Actors(query) => write!(f, "actors{:?}", query.params()),
            Self::Actor(id) => write!(f, "actor/{id}"),
            Self::Directors => f.write_str("directors"),
            Self::Director(id) => write!(f, "director/{id}"),
            Self::Genres => f.write_str("genres"),
            Self::Reviews(movie_id) => write!(f, "movie/{movie_id}/reviews"),
        }
    }
}

/// A write and the tags it invalidates on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateMovie,
    UpdateMovie(i64),
    DeleteMovie(i64),
    CreateReview,
}

impl Mutation {
    #[must_use]
    pub fn invalidates(&self) -> Vec<Tag> {
        use EntityKind::{Movie, Review};

        match self {
            Self::CreateMovie | Self::DeleteMovie(_) => vec![Tag::of(Movie)],
            Self::UpdateMovie(id) => vec![Tag::entity(Movie, *id), Tag::of(Movie)],
            Self::CreateReview => vec![Tag::of(Review)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_stales_every_movie_read() {
        let tags = Mutation::DeleteMovie(5).invalidates();
        assert!(QueryKey::Movie(5).is_invalidated_by(&tags));
        assert!(QueryKey::Movie(9).is_invalidated_by(&tags));
        assert!(QueryKey::Search("heat".into()).is_invalidated_by(&tags));
        assert!(QueryKey::Movies(MovieQuery::home(10)).is_invalidated_by(&tags));
        assert!(!QueryKey::Genres.is_invalidated_by(&tags));
        assert!(!QueryKey::Reviews(5).is_invalidated_by(&tags));
    }

    #[test]
    fn review_creation_only_touches_reviews() {
        let tags = Mutation::CreateReview.invalidates();
        assert!(QueryKey::Reviews(3).is_invalidated_by(&tags));
        assert!(!QueryKey::Movie(3).is_invalidated_by(&tags));
        assert!(!QueryKey::Actors(ActorQuery::default()).is_invalidated_by(&tags));
    }

    #[test]
    fn id_tag_alone_spares_other_entities() {
        let tags = [Tag::entity(EntityKind::Actor, 1)];
        assert!(QueryKey::Actor(1).is_invalidated_by(&tags));
        assert!(!QueryKey::Actor(2).is_invalidated_by(&tags));
        assert!(QueryKey::Actors(ActorQuery::default()).is_invalidated_by(&tags));
    }
}
