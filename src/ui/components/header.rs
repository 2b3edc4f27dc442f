//! Header and notice renderers.

use super::render_rule;
use crate::ui::helpers::center;
use crate::ui::viewmodel::HeaderInfo;
use std::fmt::{self, Write};

/// Renders the centered title, the admin badge and, on the home page, the
/// search box.
///
/// # Layout
///
/// ```text
///                 Marquee
/// [admin]  Search: matrix_
/// ────────────────────────────────
/// ```
///
/// # Errors
///
/// Propagates writer errors.
pub fn render_header(out: &mut impl Write, header: &HeaderInfo, cols: usize) -> fmt::Result {
    writeln!(out, "{}", center(&header.title, cols))?;

    let badge = if header.admin { "[admin]" } else { "[viewer]" };
    match &header.search {
        Some(query) => writeln!(out, "{badge}  Search: {query}_")?,
        None => writeln!(out, "{badge}")?,
    }
    render_rule(out, cols)
}

/// Renders the outcome line of the last write, if any.
///
/// # Errors
///
/// Propagates writer errors.
pub fn render_notice(out: &mut impl Write, notice: Option<&str>) -> fmt::Result {
    match notice {
        Some(text) => writeln!(out, "» {text}"),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_header_shows_search_box() {
        let mut out = String::new();
        let header = HeaderInfo {
            title: "Marquee".to_string(),
            admin: false,
            search: Some("heat".to_string()),
        };
        render_header(&mut out, &header, 20).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "      Marquee");
        assert_eq!(lines[1], "[viewer]  Search: heat_");
        assert_eq!(lines[2].chars().count(), 20);
    }
}
