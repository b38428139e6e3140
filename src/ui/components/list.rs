//! Trivia list and featured card renderers.

use crate::ui::helpers::{fit_to_width, position_cursor, render_highlighted_text, truncate_to_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, LIST_ITEM_HEIGHT};

const LIST_MARGIN: usize = 2;

/// Renders the featured pick as a boxed card with every line shown.
///
/// Returns the next free row; the height matches [`CardItem::boxed_height`].
pub fn render_featured(row: usize, card: &CardItem, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(LIST_MARGIN * 2 + 2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(LIST_MARGIN));
    print!("{}╭{}╮{}", Theme::fg(&theme.colors.accent), "─".repeat(inner), Theme::reset());

    let mut current_row = row + 1;
    let mut body = vec![(true, card.title.as_str())];
    body.extend(card.lines.iter().map(|line| (false, line.as_str())));
    for (is_title, text) in body {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(LIST_MARGIN));
        print!("{}│{}", Theme::fg(&theme.colors.accent), Theme::reset());
        if is_title {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!(" {}", fit_to_width(text, inner.saturating_sub(1)));
        print!("{}{}│{}", Theme::reset(), Theme::fg(&theme.colors.accent), Theme::reset());
        current_row += 1;
    }

    position_cursor(current_row, 1);
    print!("{}", " ".repeat(LIST_MARGIN));
    print!("{}╰{}╯{}", Theme::fg(&theme.colors.accent), "─".repeat(inner), Theme::reset());

    current_row + 2
}

/// Renders list entries, [`LIST_ITEM_HEIGHT`] rows each: the title, then the
/// card lines joined on one dimmed line.
pub fn render_list(row: usize, items: &[CardItem], theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(LIST_MARGIN * 2);
    let mut current_row = row;

    for item in items {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(LIST_MARGIN));
        if item.is_selected {
            print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
            print!("{}", Theme::bold());
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        let title = fit_to_width(&format!("  {}", item.title), width);
        let shifted: Vec<(usize, usize)> = item
            .highlight_ranges
            .iter()
            .map(|&(start, end)| (start + 2, end + 2))
            .collect();
        render_highlighted_text(&title, &shifted, theme, item.is_selected);
        print!("{}", Theme::reset());

        position_cursor(current_row + 1, 1);
        print!("{}", " ".repeat(LIST_MARGIN + 4));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", truncate_to_width(&item.lines.join("  ·  "), width.saturating_sub(4)));
        print!("{}", Theme::reset());

        current_row += LIST_ITEM_HEIGHT;
    }

    current_row
}
