//! Page body renderers.

use super::cards::{render_card, render_card_compact};
use super::search::render_search;
use crate::ui::helpers::{center, rating_badge};
use crate::ui::viewmodel::{
    Body, CarouselRow, GridView, ListView, MovieDetailView, PersonView, ReviewLine,
};
use std::fmt::{self, Write};

/// Renders the main content area.
///
/// # Errors
///
/// Propagates writer errors.
pub fn render_body(out: &mut impl Write, body: &Body, cols: usize) -> fmt::Result {
    match body {
        Body::Loading(message) | Body::Empty(message) => {
            writeln!(out)?;
            writeln!(out, "{}", center(message, cols))
        }
        Body::Failed { message, .. } => {
            writeln!(out)?;
            writeln!(out, "{}", center(message, cols))
        }
        Body::Home(rows) => {
            for row in rows {
                render_carousel(out, row)?;
            }
            Ok(())
        }
        Body::Search(search) => render_search(out, search),
        Body::Grid(grid) => render_grid(out, grid, cols),
        Body::Movie(detail) => render_movie(out, detail),
        Body::Person(person) => render_person(out, person),
        Body::List(list) => render_list(out, list),
    }
}

/// One carousel: heading, arrows, then the cards on one line each.
fn render_carousel(out: &mut impl Write, row: &CarouselRow) -> fmt::Result {
    let left = if row.show_left_arrow { "‹" } else { " " };
    let right = if row.show_right_arrow { "›" } else { " " };
    writeln!(out, "{} ({})  {left} {right}", row.genre_name, row.movie_count)?;
    for card in &row.cards {
        write!(out, "  ")?;
        render_card_compact(out, card)?;
        writeln!(out)?;
    }
    writeln!(out)
}

fn render_grid(out: &mut impl Write, grid: &GridView, cols: usize) -> fmt::Result {
    if let Some(message) = &grid.empty_message {
        writeln!(out)?;
        return writeln!(out, "{}", center(message, cols));
    }

    if let Some((loaded, total)) = grid.progress {
        writeln!(out, "{loaded} of {total}")?;
    }
    for card in &grid.cards {
        render_card(out, card, 0)?;
    }
    if let Some(error) = &grid.error {
        writeln!(out, "Could not load more: {error}")?;
    }
    if grid.loading_more {
        writeln!(out, "{}", center("Loading more movies...", cols))?;
    }
    if let Some(end) = &grid.end_message {
        writeln!(out, "{}", center(end, cols))?;
    }
    Ok(())
}

fn render_movie(out: &mut impl Write, detail: &MovieDetailView) -> fmt::Result {
    render_card(out, &detail.card, 0)?;
    writeln!(out, "Director: {}", detail.card.director)?;
    if let Some(language) = &detail.language {
        writeln!(out, "Language: {language}")?;
    }
    if let Some(description) = &detail.description {
        writeln!(out)?;
        writeln!(out, "{description}")?;
    }

    if !detail.cast.is_empty() {
        writeln!(out)?;
        writeln!(out, "Cast")?;
        for line in &detail.cast {
            match &line.role {
                Some(role) => writeln!(out, "  #{} {} as {role}", line.actor_id, line.name)?,
                None => writeln!(out, "  #{} {}", line.actor_id, line.name)?,
            }
        }
    }

    writeln!(out)?;
    render_reviews(
        out,
        detail.reviews.as_deref(),
        detail.reviews_error.as_deref(),
        detail.review_error.as_deref(),
    )
}

/// Renders a movie's review section.
///
/// `reviews` is `None` while loading, or when `load_error` says why it never
/// arrived. `submit_error` is the inline error of the review form.
///
/// # Errors
///
/// Propagates writer errors.
pub fn render_reviews(
    out: &mut impl Write,
    reviews: Option<&[ReviewLine]>,
    load_error: Option<&str>,
    submit_error: Option<&str>,
) -> fmt::Result {
    match (reviews, load_error) {
        (None, Some(message)) => writeln!(out, "Reviews unavailable: {message}")?,
        (None, None) => writeln!(out, "Reviews: loading...")?,
        (Some(reviews), _) => render_review_lines(out, reviews)?,
    }
    if let Some(error) = submit_error {
        writeln!(out, "Review not saved: {error}")?;
    }
    Ok(())
}

fn render_review_lines(out: &mut impl Write, reviews: &[ReviewLine]) -> fmt::Result {
    match reviews {
        [] => writeln!(out, "Reviews: none yet"),
        reviews => {
            writeln!(out, "Reviews ({})", reviews.len())?;
            for review in reviews {
                writeln!(
                    out,
                    "  {} {} on {}",
                    rating_badge(Some(review.rating)),
                    review.reviewer_name,
                    review.date
                )?;
                if let Some(comment) = &review.comment {
                    writeln!(out, "    {comment}")?;
                }
            }
            Ok(())
        }
    }
}

fn render_person(out: &mut impl Write, person: &PersonView) -> fmt::Result {
    match person.birth_year {
        Some(year) => writeln!(out, "{} (born {year})", person.name)?,
        None => writeln!(out, "{}", person.name)?,
    }
    if let Some(bio) = &person.bio {
        writeln!(out, "{bio}")?;
    }
    writeln!(out)?;
    writeln!(out, "Movies")?;
    if person.filmography.is_empty() {
        return writeln!(out, "  No movies found.");
    }
    for card in &person.filmography {
        render_card(out, card, 2)?;
    }
    Ok(())
}

fn render_list(out: &mut impl Write, list: &ListView) -> fmt::Result {
    if list.items.is_empty() {
        return writeln!(out, "{}", list.empty_message);
    }
    for item in &list.items {
        match &item.detail {
            Some(detail) => writeln!(out, "#{} {}  ({detail})", item.id, item.name)?,
            None => writeln!(out, "#{} {}", item.id, item.name)?,
        }
    }
    Ok(())
}
