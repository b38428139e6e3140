//! Genre landscape grid renderer.

use crate::ui::helpers::{fit_to_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::GenreGridView;

const GRID_MARGIN: usize = 2;

/// Renders the heading, subtitle, and one row per `columns` tiles.
///
/// Each tile reads `Label  12k books`; the selected tile is drawn in selection
/// colors and the genre shown in the collection gets a `●` marker.
pub fn render_genre_grid(row: usize, grid: &GenreGridView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(GRID_MARGIN));
    print!("{}", Theme::bold());
    let title_color = if grid.is_focused {
        &theme.colors.accent
    } else {
        &theme.colors.header_fg
    };
    print!("{}{}{}", Theme::fg(title_color), grid.title, Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(GRID_MARGIN));
    print!("{}{}{}", Theme::fg(&theme.colors.text_dim), grid.subtitle, Theme::reset());

    let columns = grid.columns.max(1);
    let tile_width = cols.saturating_sub(GRID_MARGIN * 2) / columns;
    let mut current_row = row + 2;

    for chunk in grid.tiles.chunks(columns) {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(GRID_MARGIN));
        for tile in chunk {
            let marker = if tile.is_active { "● " } else { "  " };
            let text = tile.stat.as_ref().map_or_else(
                || format!("{marker}{}", tile.label),
                |stat| format!("{marker}{}  {stat}", tile.label),
            );
            if tile.is_selected {
                print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
            } else if tile.is_active {
                print!("{}", Theme::fg(&theme.colors.accent));
            } else {
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
            print!("{}", fit_to_width(&text, tile_width.saturating_sub(1)));
            print!("{} ", Theme::reset());
        }
        current_row += 1;
    }

    current_row + 1
}
