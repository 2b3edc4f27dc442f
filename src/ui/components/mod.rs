//! Composable text renderers, one per part of the page.
//!
//! Each renderer writes into any [`std::fmt::Write`] and returns
//! [`std::fmt::Result`], so callers can render to a `String` or straight into a
//! formatter.
//!
//! # Components
//!
//! - [`header`]: Title bar with admin badge and search box
//! - [`cards`]: Movie card lines
//! - [`pages`]: Carousels, genre grid, detail and list pages
//! - [`search`]: Search overlay phases and grouped results
//! - [`dialogs`]: Add/edit form and delete confirmation

pub mod cards;
pub mod dialogs;
pub mod header;
pub mod pages;
pub mod search;

pub use dialogs::{render_confirm, render_form};
pub use header::{render_header, render_notice};
pub use pages::{render_body, render_reviews};

use std::fmt::{self, Write};

/// Writes a horizontal rule across `cols` columns.
///
/// # Errors
///
/// Propagates writer errors.
pub fn render_rule(out: &mut impl Write, cols: usize) -> fmt::Result {
    writeln!(out, "{}", "─".repeat(cols))
}
