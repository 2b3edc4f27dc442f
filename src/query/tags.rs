//! Cache tags.
//!
//! A tag names an entity type, optionally narrowed to one id. Reads declare the
//! tags they provide; writes declare the tags they invalidate.

use std::fmt;

/// Entity types the backend serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Movie,
    Actor,
    Director,
    Genre,
    Review,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Actor => "Actor",
            Self::Director => "Director",
            Self::Genre => "Genre",
            Self::Review => "Review",
        }
    }
}

/// A cache tag: `Movie` or `Movie:5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub kind: EntityKind,
    pub id: Option<i64>,
}

impl Tag {
    /// Type-only tag.
    #[must_use]
    pub const fn of(kind: EntityKind) -> Self {
        Self { kind, id: None }
    }

    /// Tag narrowed to a single entity.
    #[must_use]
    pub const fn entity(kind: EntityKind, id: i64) -> Self {
        Self { kind, id: Some(id) }
    }

    /// Whether invalidating `self` makes an entry providing `provided` stale.
    ///
    /// A type-only tag matches every tag of its type. An id tag matches the same
    /// id and the bare type tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::query::{EntityKind, Tag};
    ///
    /// let all = Tag::of(EntityKind::Movie);
    /// let five = Tag::entity(EntityKind::Movie, 5);
    /// let six = Tag::entity(EntityKind::Movie, 6);
    ///
    /// assert!(all.invalidates(&five));
    /// assert!(five.invalidates(&all));
    /// assert!(!five.invalidates(&six));
    /// ```
    #[must_use]
    pub fn invalidates(&self, provided: &Self) -> bool {
        if self.kind != provided.kind {
            return false;
        }
        match (self.id, provided.id) {
            (Some(target), Some(held)) => target == held,
            _ => true,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{}:{id}", self.kind.as_str()),
            None => f.write_str(self.kind.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_never_cross() {
        let review = Tag::of(EntityKind::Review);
        assert!(!review.invalidates(&Tag::of(EntityKind::Movie)));
        assert!(!review.invalidates(&Tag::entity(EntityKind::Movie, 1)));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Tag::of(EntityKind::Genre).to_string(), "Genre");
        assert_eq!(Tag::entity(EntityKind::Review, 12).to_string(), "Review:12");
    }
}
