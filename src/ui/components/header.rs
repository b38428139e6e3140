//! Header component renderer.
//!
//! Renders the two-line title block: a bold centered title and a dimmed
//! centered subtitle.

use crate::ui::helpers::{position_cursor, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next free row (`row + 2`).
///
/// Both lines are padded to the full width so a header background, when the
/// theme sets one, spans the pane.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    render_centered(row, &header.title, theme, cols, Theme::bold(), &theme.colors.header_fg);
    render_centered(row + 1, &header.subtitle, theme, cols, Theme::dim(), &theme.colors.text_dim);
    row + 2
}

fn render_centered(row: usize, text: &str, theme: &Theme, cols: usize, style: &str, color: &str) {
    let text = truncate_to_width(text, cols);
    let text_len = text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", Theme::fg(color));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));

    print!("{}", Theme::reset());
}
