//! Detail overlay renderer.
//!
//! Draws a framed box over the body, leaving a margin of the screen visible
//! around it. Lines are word-wrapped to the box; content that does not fit is
//! cut with a trailing `…` row.

use crate::ui::helpers::{fit_to_width, position_cursor, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{LineStyle, ModalView};

const MODAL_MARGIN_X: usize = 4;
const MODAL_MARGIN_Y: usize = 2;

/// Renders `modal` over the rows `[top, bottom)` of the pane.
pub fn render_modal(modal: &ModalView, theme: &Theme, top: usize, bottom: usize, cols: usize) {
    let left = MODAL_MARGIN_X + 1;
    let width = cols.saturating_sub(MODAL_MARGIN_X * 2);
    let inner = width.saturating_sub(4);
    let first = top + MODAL_MARGIN_Y;
    let last = bottom.saturating_sub(MODAL_MARGIN_Y);
    if width < 10 || last <= first + 3 {
        return;
    }
    let frame = &theme.colors.card_border;

    position_cursor(first, left);
    let title = format!(" {} ", modal.title);
    let title = fit_to_width(&title, width.saturating_sub(4).min(title.chars().count()));
    let rule = "─".repeat(width.saturating_sub(4 + title.chars().count()));
    print!("{}╭─{}{}{title}{}{}{rule}─╮{}", Theme::fg(frame), Theme::reset(), Theme::bold(), Theme::reset(), Theme::fg(frame), Theme::reset());

    let mut rows: Vec<(LineStyle, String)> = Vec::new();
    if modal.loading {
        rows.push((LineStyle::Dim, "Loading...".to_string()));
    }
    for line in &modal.lines {
        if line.style == LineStyle::Heading && !rows.is_empty() {
            rows.push((LineStyle::Body, String::new()));
        }
        for wrapped in wrap_text(&line.text, inner) {
            rows.push((line.style, wrapped));
        }
    }

    let capacity = last - first - 2;
    if rows.len() > capacity {
        rows.truncate(capacity.saturating_sub(1));
        rows.push((LineStyle::Dim, "…".to_string()));
    }
    rows.resize(capacity, (LineStyle::Body, String::new()));

    for (offset, (style, text)) in rows.iter().enumerate() {
        position_cursor(first + 1 + offset, left);
        print!("{}│{} ", Theme::fg(frame), Theme::reset());
        print!("{}", line_style(*style, theme));
        print!("{}", fit_to_width(text, inner));
        print!("{} {}│{}", Theme::reset(), Theme::fg(frame), Theme::reset());
    }

    position_cursor(last - 1, left);
    let footer = format!(" {} ", modal.footer);
    let footer = fit_to_width(&footer, width.saturating_sub(4).min(footer.chars().count()));
    let rule = "─".repeat(width.saturating_sub(4 + footer.chars().count()));
    print!("{}╰─{rule}{}{}{footer}{}{}─╯{}", Theme::fg(frame), Theme::reset(), Theme::fg(&theme.colors.text_dim), Theme::reset(), Theme::fg(frame), Theme::reset());
}

fn line_style(style: LineStyle, theme: &Theme) -> String {
    match style {
        LineStyle::Heading => format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent)),
        LineStyle::Body => Theme::fg(&theme.colors.text_normal),
        LineStyle::Dim => format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
        LineStyle::Accent => Theme::fg(&theme.colors.accent),
        LineStyle::Link => format!("{}{}", Theme::underline(), Theme::fg(&theme.colors.link)),
        LineStyle::Selected => format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        ),
    }
}
