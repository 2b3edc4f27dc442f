//! Movie card renderer.

use crate::ui::helpers::{highlight, rating_badge, truncate};
use crate::ui::viewmodel::MovieCard;
use std::fmt::{self, Write};

/// Widest blurb printed under a card.
const BLURB_WIDTH: usize = 72;

/// Renders one card as two lines: title line and blurb.
///
/// ```text
///   #7 He[at] (1995) • Crime  ★ 8.3  [edit] [delete]
///      A heist goes wrong.
/// ```
///
/// # Errors
///
/// Propagates writer errors.
pub fn render_card(out: &mut impl Write, card: &MovieCard, indent: usize) -> fmt::Result {
    let pad = " ".repeat(indent);
    write!(
        out,
        "{pad}#{} {} ({}) • {}",
        card.id,
        highlight(&card.title, &card.highlight_ranges),
        card.release_year,
        card.genre
    )?;

    let badge = rating_badge(card.rating);
    if !badge.is_empty() {
        write!(out, "  {badge}")?;
    }
    if card.show_admin_actions {
        write!(out, "  [edit] [delete]")?;
    }
    writeln!(out)?;
    writeln!(out, "{pad}   {}", truncate(&card.blurb, BLURB_WIDTH))
}

/// Compact single-line form used inside carousels.
///
/// # Errors
///
/// Propagates writer errors.
pub fn render_card_compact(out: &mut impl Write, card: &MovieCard) -> fmt::Result {
    write!(out, "[#{} {} ({})", card.id, truncate(&card.title, 28), card.release_year)?;
    let badge = rating_badge(card.rating);
    if !badge.is_empty() {
        write!(out, " {badge}")?;
    }
    write!(out, "]")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(admin: bool) -> MovieCard {
        MovieCard {
            id: 7,
            title: "Heat".to_string(),
            release_year: 1995,
            genre: "Crime".to_string(),
            director: "Michael Mann".to_string(),
            rating: Some(8.3),
            blurb: "Directed by Michael Mann".to_string(),
            highlight_ranges: vec![(2, 4)],
            show_admin_actions: admin,
        }
    }

    #[test]
    fn admin_card_shows_actions() {
        let mut out = String::new();
        render_card(&mut out, &card(true), 0).unwrap();
        assert_eq!(
            out.lines().next(),
            Some("#7 He[at] (1995) • Crime  ★ 8.3  [edit] [delete]")
        );
    }

    #[test]
    fn viewer_card_hides_actions() {
        let mut out = String::new();
        render_card(&mut out, &card(false), 2).unwrap();
        assert!(!out.contains("[edit]"));
        assert!(out.starts_with("  #7"));
    }
}
