//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: the body layout, then the overlay on top
//!
//! Output is ANSI escape sequences printed to stdout; the Zellij host clears the
//! pane before each `render` call.

use crate::app::AppState;
use crate::ui::components::{self, BODY_TOP};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ScreenBody, UIViewModel};

/// Renders the plugin UI for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a pre-computed view model.
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.body {
        ScreenBody::Loading(empty) => components::render_loading_layout(vm, empty, theme, cols, rows),
        ScreenBody::Catalog(view) => components::render_catalog_layout(vm, view, theme, cols, rows),
        ScreenBody::Trivia(view) => components::render_trivia_layout(vm, view, theme, cols, rows),
    }

    if let Some(modal) = &vm.overlay {
        components::render_modal(modal, theme, BODY_TOP, rows.saturating_sub(2), cols);
    }
}
