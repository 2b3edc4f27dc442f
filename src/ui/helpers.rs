//! Shared text formatting utilities for the renderer.
//!
//! Everything works on character indices rather than bytes, so titles with
//! multi-byte characters highlight and pad correctly.

/// Marks highlighted character ranges of `text` with brackets.
///
/// Ranges are `(start, end)` with an exclusive end, as produced by
/// [`highlight_ranges`](crate::search::highlight_ranges).
///
/// # Example
///
/// ```rust
/// use marquee::ui::helpers::highlight;
///
/// assert_eq!(highlight("The Matrix", &[(4, 10)]), "The [Matrix]");
/// assert_eq!(highlight("Heat", &[]), "Heat");
/// ```
#[must_use]
pub fn highlight(text: &str, ranges: &[(usize, usize)]) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 2);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        out.extend(&chars[current_pos..start]);
        out.push('[');
        out.extend(&chars[start..end]);
        out.push(']');
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}

/// Centers `text` in `cols` columns, without trailing padding.
#[must_use]
pub fn center(text: &str, cols: usize) -> String {
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(padding))
}

/// Cuts `text` to at most `max` characters, ending with an ellipsis when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Star rating badge, e.g. `★ 8.3`.
#[must_use]
pub fn rating_badge(rating: Option<f64>) -> String {
    rating.map_or_else(String::new, |r| format!("★ {r:.1}"))
}
