//! Search overlay renderer.

use super::cards::render_card;
use crate::ui::viewmodel::SearchView;
use std::fmt::{self, Write};

/// Renders the search overlay for whichever phase it is in.
///
/// Results are printed as one section per genre, in the order the groups
/// were formed.
///
/// # Errors
///
/// Propagates writer errors.
pub fn render_search(out: &mut impl Write, search: &SearchView) -> fmt::Result {
    match search {
        SearchView::Pending { term } => writeln!(out, "Search for \"{term}\"..."),
        SearchView::Searching { term } => writeln!(out, "Searching for \"{term}\"..."),
        SearchView::NoResults { term } => writeln!(out, "No movies found for \"{term}\""),
        SearchView::Failed { term, message } => {
            writeln!(out, "Search for \"{term}\" failed: {message}")
        }
        SearchView::Results { term, groups } => {
            let total: usize = groups.iter().map(|g| g.cards.len()).sum();
            writeln!(out, "Results for \"{term}\" ({total})")?;
            for group in groups {
                writeln!(out)?;
                writeln!(out, "{}", group.genre_name)?;
                for card in &group.cards {
                    render_card(out, card, 2)?;
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{MovieCard, SearchGroup};

    fn card(id: i64, title: &str) -> MovieCard {
        MovieCard {
            id,
            title: title.to_string(),
            release_year: 2000,
            genre: "Drama".to_string(),
            director: "Someone".to_string(),
            rating: None,
            blurb: "Directed by Someone".to_string(),
            highlight_ranges: vec![],
            show_admin_actions: false,
        }
    }

    #[test]
    fn results_are_sectioned_by_genre() {
        let view = SearchView::Results {
            term: "a".to_string(),
            groups: vec![
                SearchGroup {
                    genre_name: "Drama".to_string(),
                    cards: vec![card(1, "A"), card(3, "C")],
                },
                SearchGroup {
                    genre_name: "Crime".to_string(),
                    cards: vec![card(2, "B")],
                },
            ],
        };
        let mut out = String::new();
        render_search(&mut out, &view).unwrap();
        assert!(out.starts_with("Results for \"a\" (3)"));
        let drama = out.find("\nDrama\n").expect("drama section");
        let crime = out.find("\nCrime\n").expect("crime section");
        assert!(drama < crime);
    }

    #[test]
    fn no_results_names_the_term() {
        let mut out = String::new();
        render_search(
            &mut out,
            &SearchView::NoResults {
                term: "zzz".to_string(),
            },
        )
        .unwrap();
        assert_eq!(out, "No movies found for \"zzz\"\n");
    }
}
