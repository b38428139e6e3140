//! Trivia tab strip renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TabInfo;

/// Renders `Books (8)  Characters (24) ...` with the active tab highlighted,
/// and the language code right-aligned. Returns the next row.
pub fn render_tabs(row: usize, tabs: &[TabInfo], language: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("  ");
    let mut used = 2;

    for tab in tabs {
        let text = format!(" {} ({}) ", tab.label, tab.count);
        used += text.chars().count() + 1;
        if tab.is_active {
            print!("{}", Theme::bold());
            print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.accent));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{text}");
        print!("{} ", Theme::reset());
    }

    let lang = format!("Language: {language}");
    let lang_len = lang.chars().count();
    if used + lang_len + 2 <= cols {
        print!("{}", " ".repeat(cols - used - lang_len - 2));
        print!("{}{lang}{}", Theme::fg(&theme.colors.accent), Theme::reset());
    }

    row + 1
}
