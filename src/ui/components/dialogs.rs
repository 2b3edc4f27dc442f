//! Add/edit form and delete confirmation renderers.

use super::render_rule;
use crate::ui::viewmodel::{ConfirmView, FormView};
use std::fmt::{self, Write};

/// Renders the movie form with its inline error.
///
/// # Errors
///
/// Propagates writer errors.
pub fn render_form(out: &mut impl Write, form: &FormView, cols: usize) -> fmt::Result {
    render_rule(out, cols)?;
    writeln!(out, "{}", form.heading)?;
    let width = form
        .fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in &form.fields {
        writeln!(out, "  {label:<width$}  {value}")?;
    }
    if let Some(error) = &form.error {
        writeln!(out, "  ! {error}")?;
    }
    if form.submitting {
        writeln!(out, "  Saving...")?;
    }
    Ok(())
}

/// Renders the delete confirmation dialog.
///
/// # Errors
///
/// Propagates writer errors.
pub fn render_confirm(out: &mut impl Write, confirm: &ConfirmView, cols: usize) -> fmt::Result {
    render_rule(out, cols)?;
    writeln!(out, "Delete Movie")?;
    writeln!(out, "This action cannot be undone")?;
    writeln!(out, "  {}", confirm.title)?;
    writeln!(out, "  {}", confirm.subtitle)?;
    writeln!(out, "  {}", confirm.director)?;
    if confirm.deleting {
        writeln!(out, "  Deleting...")?;
    }
    Ok(())
}
