//! Composable UI component renderers.
//!
//! Each component prints one part of the interface at a given row and returns
//! the next free row, so layouts read as a top-to-bottom sequence.
//!
//! # Components
//!
//! - [`header`]: Title and subtitle
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search/filter input box and hint line
//! - [`empty`]: Centered message for loading and empty states
//! - [`gallery`]: Horizontally scrolling card row
//! - [`genres`]: Genre landscape grid
//! - [`tabs`]: Trivia tab strip
//! - [`list`]: Trivia list and featured card
//! - [`modal`]: Detail overlay
//!
//! # Layouts
//!
//! - [`render_loading_layout`]: Header + centered message + Footer
//! - [`render_catalog_layout`]: Header + `SearchBar` + blocks + Footer
//! - [`render_trivia_layout`]: Header + tabs + `FilterBar` + featured + list + Footer

mod empty;
mod footer;
mod gallery;
mod genres;
mod header;
mod list;
mod modal;
mod search;
mod tabs;

pub use empty::render_empty_state;
pub use modal::render_modal;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CatalogBlock, CatalogView, EmptyState, TriviaView, UIViewModel};

use footer::render_footer;
use gallery::render_gallery;
use genres::render_genre_grid;
use header::render_header;
use list::{render_featured, render_list};
use search::{render_search_bar, render_search_hint};
use tabs::render_tabs;

/// Row where every layout's body starts: blank, title, subtitle, border.
pub const BODY_TOP: usize = 5;

/// Renders a horizontal border line at `row` and returns `row + 1`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Header, border, then returns the first body row.
fn render_top(vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    let current_row = render_header(2, &vm.header, theme, cols);
    render_border(current_row, &theme.colors.border, cols)
}

/// Border and footer on the last two rows.
fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_start = rows.saturating_sub(1).max(1);
    let border_row = footer_start.saturating_sub(1).max(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}

/// Loading screen or permission notice.
///
/// ```text
/// [blank line]
/// [Header - 2 lines]
/// [Border]
/// [5 blank lines]
/// [Message]
/// [Subtitle]
/// [Border]
/// [Footer]
/// ```
pub fn render_loading_layout(vm: &UIViewModel, empty: &EmptyState, theme: &Theme, cols: usize, rows: usize) {
    let body_top = render_top(vm, theme, cols);
    render_empty_state(body_top + 5, empty, theme, cols);
    render_bottom(vm, theme, cols, rows);
}

/// Catalog screen.
///
/// ```text
/// [blank line]
/// [Header - 2 lines]
/// [Border]
/// [Search Bar - 3 lines]
/// [Hint]
/// [Blocks that fit: genre grid, galleries]
/// [Border]
/// [Footer]
/// ```
pub fn render_catalog_layout(vm: &UIViewModel, view: &CatalogView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_top(vm, theme, cols);
    current_row = render_search_bar(current_row, &view.search_bar, theme, cols);
    current_row = render_search_hint(current_row, &view.search_bar, theme, cols);

    for block in &view.blocks {
        current_row = match block {
            CatalogBlock::Genres(grid) => render_genre_grid(current_row, grid, theme, cols),
            CatalogBlock::Gallery(gallery) => render_gallery(current_row, gallery, theme, cols),
        };
    }

    render_bottom(vm, theme, cols, rows);
}

/// Trivia screen.
///
/// ```text
/// [blank line]
/// [Header - 2 lines]
/// [Border]
/// [Tabs + language]
/// [blank]
/// [Filter Bar - 3 lines]
/// [Featured card]
/// [List entries, or empty state]
/// [Border]
/// [Footer]
/// ```
pub fn render_trivia_layout(vm: &UIViewModel, view: &TriviaView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_top(vm, theme, cols);
    current_row = render_tabs(current_row, &view.tabs, &view.language, theme, cols);
    current_row = render_search_bar(current_row + 1, &view.filter_bar, theme, cols);

    if let Some(featured) = &view.featured {
        current_row = render_featured(current_row, featured, theme, cols);
    }

    if let Some(empty) = &view.empty_state {
        render_empty_state(current_row + 1, empty, theme, cols);
    } else {
        render_list(current_row, &view.items, theme, cols);
    }

    render_bottom(vm, theme, cols, rows);
}
