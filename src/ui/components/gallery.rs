//! Horizontal card gallery renderer.
//!
//! Cards are laid out on a virtual strip `CARD_STRIDE` columns apart and the
//! strip is shifted left by the gallery's scroll offset. Cards crossing either
//! edge of the viewport are clipped column by column.

use crate::app::gallery::CARD_STRIDE;
use crate::ui::helpers::{fit_to_width, position_cursor, render_highlighted_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, GalleryView, CARD_HEIGHT, CARD_LINES};

/// Left margin of a gallery row; the same on the right.
pub const GALLERY_MARGIN: usize = 2;

/// Width of one card, borders included.
const CARD_WIDTH: usize = CARD_STRIDE - 2;

/// Renders a gallery heading and its card row at `row`.
///
/// Returns the next free row, a blank gap line included.
pub fn render_gallery(row: usize, gallery: &GalleryView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(GALLERY_MARGIN));
    print!("{}", Theme::bold());
    let title_color = if gallery.is_focused {
        &theme.colors.accent
    } else {
        &theme.colors.header_fg
    };
    print!("{}", Theme::fg(title_color));
    print!("{}", gallery.title);
    print!("{}", Theme::reset());
    if gallery.loading {
        print!("{}  loading...{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    }

    let viewport = cols.saturating_sub(GALLERY_MARGIN * 2);
    for (index, card) in gallery.cards.iter().enumerate() {
        let start = index * CARD_STRIDE;
        let end = start + CARD_WIDTH;
        if end <= gallery.offset || start >= gallery.offset + viewport {
            continue;
        }
        let clip_left = gallery.offset.saturating_sub(start);
        let clip_right = (end - gallery.offset).saturating_sub(viewport).min(CARD_WIDTH);
        let col = GALLERY_MARGIN + 1 + start.saturating_sub(gallery.offset);
        render_card(row + 1, col, card, theme, clip_left, CARD_WIDTH - clip_right);
    }

    row + 1 + CARD_HEIGHT + 1
}

/// Draws the visible columns `[from, to)` of one card.
fn render_card(row: usize, col: usize, card: &CardItem, theme: &Theme, from: usize, to: usize) {
    if from >= to {
        return;
    }
    let inner = CARD_WIDTH - 2;
    let border = if card.is_selected {
        &theme.colors.selection_bg
    } else {
        &theme.colors.card_border
    };

    let mut lines = Vec::with_capacity(CARD_HEIGHT);
    lines.push(format!("╭{}╮", "─".repeat(inner)));
    lines.push(format!("│{}│", fit_to_width(&card.title, inner)));
    for index in 0..CARD_LINES {
        let text = card.lines.get(index).map_or("", String::as_str);
        lines.push(format!("│{}│", fit_to_width(text, inner)));
    }
    lines.push(format!("╰{}╯", "─".repeat(inner)));

    let whole = from == 0 && to == CARD_WIDTH;
    for (offset, line) in lines.iter().enumerate() {
        position_cursor(row + offset, col);
        let visible: String = line.chars().skip(from).take(to - from).collect();

        if offset == 1 && whole {
            // Title row: frame, then bold (and highlighted) title text.
            print!("{}│", Theme::fg(border));
            if card.is_selected {
                print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
            } else {
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
            print!("{}", Theme::bold());
            let title = fit_to_width(&card.title, inner);
            render_highlighted_text(&title, &card.highlight_ranges, theme, card.is_selected);
            print!("{}{}│{}", Theme::reset(), Theme::fg(border), Theme::reset());
            continue;
        }

        let is_frame = offset == 0 || offset == lines.len() - 1;
        let color = if is_frame { border } else { &theme.colors.text_normal };
        print!("{}{visible}{}", Theme::fg(color), Theme::reset());
    }
}
