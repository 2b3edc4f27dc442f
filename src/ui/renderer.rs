//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` into [`ViewModel`]
//! 2. **Component Rendering**: header, notice, body, then any open dialog
//!
//! # Example
//!
//! ```rust
//! use marquee::app::AppState;
//! use marquee::ui::render;
//! use std::time::Duration;
//!
//! let state = AppState::new(10, Duration::from_millis(300), true);
//! let text = render(&state, 60);
//! assert!(text.contains("Loading movies..."));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::ViewModel;
use std::fmt::{self, Write};

/// Renders the current state as plain text, `cols` columns wide.
#[must_use]
pub fn render(state: &AppState, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, cols)
}

/// Renders a precomputed view model.
#[must_use]
pub fn render_viewmodel(vm: &ViewModel, cols: usize) -> String {
    let mut out = String::new();
    if let Err(error) = write_viewmodel(&mut out, vm, cols) {
        tracing::warn!(error = %error, "rendering interrupted");
    }
    out
}

fn write_viewmodel(out: &mut impl Write, vm: &ViewModel, cols: usize) -> fmt::Result {
    components::render_header(out, &vm.header, cols)?;
    components::render_notice(out, vm.notice.as_deref())?;
    components::render_body(out, &vm.body, cols)?;

    if let Some(form) = &vm.form {
        components::render_form(out, form, cols)?;
    }
    if let Some(confirm) = &vm.confirm_delete {
        components::render_confirm(out, confirm, cols)?;
    }
    Ok(())
}
