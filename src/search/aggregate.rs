//! Grouping of flat search results by genre.

use crate::domain::Movie;
use std::collections::HashMap;

/// Movies sharing one genre, in the order the backend ranked them.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreGroup {
    pub genre_name: String,
    pub movies: Vec<Movie>,
}

/// Groups `movies` by genre in a single pass.
///
/// Groups appear in first-occurrence order of their genre and keep the input
/// order within each group. Movies without a genre land in the
/// [`UNKNOWN_GENRE`](crate::domain::UNKNOWN_GENRE) bucket.
///
/// # Examples
///
/// ```
/// use marquee::search::group_by_genre;
///
/// assert!(group_by_genre(Vec::new()).is_empty());
/// ```
#[must_use]
pub fn group_by_genre(movies: impl IntoIterator<Item = Movie>) -> Vec<GenreGroup> {
    let mut groups: Vec<GenreGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for movie in movies {
        let genre = movie.genre_name().to_string();
        if let Some(&slot) = index.get(&genre) {
            groups[slot].movies.push(movie);
        } else {
            index.insert(genre.clone(), groups.len());
            groups.push(GenreGroup {
                genre_name: genre,
                movies: vec![movie],
            });
        }
    }

    groups
}

/// Concatenates groups back into one ordered list.
#[must_use]
pub fn flatten(groups: &[GenreGroup]) -> Vec<Movie> {
    groups
        .iter()
        .flat_map(|group| group.movies.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNKNOWN_GENRE;
    use chrono::Utc;

    fn movie(id: i64, genre: Option<&str>) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            director: "Someone".to_string(),
            director_id: None,
            release_year: 2001,
            genre: genre.map(str::to_string),
            rating: None,
            description: None,
            language: None,
            image_url: None,
            created_at: Utc::now(),
            cast: None,
            reviews: None,
        }
    }

    fn ids(group: &GenreGroup) -> Vec<i64> {
        group.movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn groups_keep_first_occurrence_order() {
        let groups = group_by_genre(vec![
            movie(1, Some("X")),
            movie(2, Some("Y")),
            movie(3, Some("X")),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].genre_name, "X");
        assert_eq!(ids(&groups[0]), vec![1, 3]);
        assert_eq!(groups[1].genre_name, "Y");
        assert_eq!(ids(&groups[1]), vec![2]);
    }

    #[test]
    fn missing_genre_goes_to_unknown() {
        let groups = group_by_genre(vec![movie(1, None), movie(2, Some("Drama")), movie(3, None)]);
        assert_eq!(groups[0].genre_name, UNKNOWN_GENRE);
        assert_eq!(ids(&groups[0]), vec![1, 3]);
    }

    #[test]
    fn regrouping_is_idempotent() {
        let movies = vec![
            movie(1, Some("A")),
            movie(2, None),
            movie(3, Some("B")),
            movie(4, Some("A")),
            movie(5, None),
        ];
        let once = group_by_genre(movies);
        let twice = group_by_genre(flatten(&once));
        assert_eq!(once, twice);
    }
}
