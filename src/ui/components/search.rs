//! Search and filter box renderer.
//!
//! A 3-line bordered box holding the label and the typed text, followed by one
//! hint line. The border takes the accent color while the box has focus.

use crate::ui::helpers::{fit_to_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the box at `row` and returns the next free row (`row + 3`).
///
/// ```text
/// [margin] ┌─────────────────────┐ [margin]
/// [margin] │ Search: dune▏       │ [margin]
/// [margin] └─────────────────────┘ [margin]
/// ```
///
/// An empty query shows the dimmed placeholder; a focused box shows a cursor
/// bar after the text.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let label = format!(" {}: ", search.label);
    let label_len = label.chars().count();
    let text_width = inner_width.saturating_sub(label_len);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit_to_width(&label, inner_width.min(label_len)));
    if search.query.is_empty() && !search.is_focused {
        print!("{}", Theme::dim());
        print!("{}", fit_to_width(&search.placeholder, text_width));
    } else {
        let cursor = if search.is_focused { "▏" } else { "" };
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", fit_to_width(&format!("{}{cursor}", search.query), text_width));
    }
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Renders the hint line under the box (blank when there is none).
pub fn render_search_hint(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN + 1));
    if let Some(hint) = &search.hint {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", fit_to_width(hint, cols.saturating_sub(SEARCH_BOX_MARGIN + 1)));
        print!("{}", Theme::reset());
    }
    row + 1
}
