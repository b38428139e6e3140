//! View model computation for the catalog screen.

use super::{
    AuthorTimeline, BookModal, CatalogState, COVER_PLACEHOLDER, GENRE_COLUMNS, LANDSCAPE_GENRES,
};
use crate::app::gallery::GalleryScroll;
use crate::app::modes::{CatalogSection, InputMode};
use crate::domain::catalog::{
    format_genre_name, truncate_text, Book, CoverSize, BIO_PREVIEW_LIMIT, DESCRIPTION_LIMIT,
};
use crate::ui::viewmodel::{
    CardItem, CatalogBlock, CatalogView, GalleryView, GenreGridView, GenreTile, LineStyle,
    ModalLine, ModalView, SearchBarInfo,
};

const SEARCH_PLACEHOLDER: &str = "Search for books, authors, or genres...";
const SUBJECT_LIMIT: usize = 10;
const PUBLISHER_LIMIT: usize = 5;
const HINT_MIN_CHARS: usize = 2;

impl CatalogState {
    /// Catalog body for a viewport of `rows` body lines.
    ///
    /// Blocks are laid out top to bottom; the first drawn block is chosen so the
    /// focused one is on screen.
    #[must_use]
    pub fn catalog_view(&self, rows: usize) -> CatalogView {
        let blocks: Vec<CatalogBlock> = self
            .visible_sections()
            .into_iter()
            .map(|section| self.block(section))
            .collect();

        CatalogView {
            search_bar: self.search_bar(),
            blocks: fit_blocks(blocks, rows),
        }
    }

    fn search_bar(&self) -> SearchBarInfo {
        let is_focused = self.input_mode == InputMode::Typing;
        let hint = (is_focused && self.search_input.chars().count() > HINT_MIN_CHARS)
            .then(|| format!("Press Enter to search for \"{}\"", self.search_input));

        SearchBarInfo {
            label: "Search".to_string(),
            query: self.search_input.clone(),
            placeholder: SEARCH_PLACEHOLDER.to_string(),
            is_focused,
            hint,
        }
    }

    fn block(&self, section: CatalogSection) -> CatalogBlock {
        let is_focused = self.section == section && self.modal.is_none();
        match section {
            CatalogSection::Genres => CatalogBlock::Genres(self.genre_grid(is_focused)),
            CatalogSection::Results => CatalogBlock::Gallery(self.gallery(
                format!("Search Results for \"{}\"", self.search_query),
                section,
                is_focused,
                false,
            )),
            CatalogSection::Trending => CatalogBlock::Gallery(self.gallery(
                "Trending Now".to_string(),
                section,
                is_focused,
                false,
            )),
            CatalogSection::Collection => CatalogBlock::Gallery(self.gallery(
                format!("{} Collection", format_genre_name(&self.selected_genre)),
                section,
                is_focused,
                false,
            )),
            CatalogSection::Shelf(index) => {
                let (title, loading) = self
                    .shelves
                    .get(index)
                    .map_or(("", false), |shelf| (shelf.title, shelf.loading));
                CatalogBlock::Gallery(self.gallery(title.to_string(), section, is_focused, loading))
            }
        }
    }

    fn genre_grid(&self, is_focused: bool) -> GenreGridView {
        let tiles = self
            .genres
            .iter()
            .take(LANDSCAPE_GENRES)
            .enumerate()
            .map(|(index, genre)| GenreTile {
                label: format_genre_name(genre),
                stat: self.genre_stats.get(genre).map(|&count| format_book_count(count)),
                is_selected: is_focused && index == self.genre_cursor,
                is_active: *genre == self.selected_genre,
            })
            .collect();

        GenreGridView {
            title: "Explore Literary Landscapes".to_string(),
            subtitle: "Discover books across different genres and themes".to_string(),
            tiles,
            columns: GENRE_COLUMNS,
            is_focused,
        }
    }

    fn gallery(&self, title: String, section: CatalogSection, is_focused: bool, loading: bool) -> GalleryView {
        let GalleryScroll { cursor, offset } = self.gallery_scroll(section);
        let cards = self
            .gallery_books(section)
            .iter()
            .enumerate()
            .map(|(index, book)| book_card(book, is_focused && index == cursor))
            .collect();

        GalleryView {
            title,
            cards,
            offset,
            is_focused,
            loading,
        }
    }

    /// The topmost overlay: author timeline over book modal.
    #[must_use]
    pub fn overlay_view(&self) -> Option<ModalView> {
        if let Some(timeline) = &self.timeline {
            return Some(self.timeline_view(timeline));
        }
        self.modal.as_ref().map(|modal| self.book_modal_view(modal))
    }

    fn book_modal_view(&self, modal: &BookModal) -> ModalView {
        let book = &modal.book;
        let mut lines = Vec::new();

        if !modal.authors.is_empty() {
            let names: Vec<&str> = modal.authors.iter().map(|a| a.name.as_str()).collect();
            lines.push(ModalLine::new(LineStyle::Accent, format!("by {}", names.join(", "))));
        } else if let Some(names) = book.authors_line() {
            lines.push(ModalLine::new(LineStyle::Accent, format!("by {names}")));
        }

        let mut facts = Vec::new();
        if let Some(year) = book.first_publish_year {
            facts.push(format!("First published {year}"));
        }
        if let Some(pages) = modal.details.as_ref().and_then(|d| d.number_of_pages) {
            facts.push(format!("{pages} pages"));
        }
        if let Some(language) = book.language.as_ref().and_then(|langs| langs.first()) {
            facts.push(language.to_uppercase());
        }
        if !facts.is_empty() {
            lines.push(ModalLine::new(LineStyle::Dim, facts.join("  ·  ")));
        }

        if let Some(average) = book.ratings_average {
            let count = book
                .ratings_count
                .map(|count| format!(" ({} ratings)", group_thousands(count)))
                .unwrap_or_default();
            lines.push(ModalLine::new(LineStyle::Accent, format!("★ {average:.1}{count}")));
        }
        if let Some(count) = book.want_to_read_count.filter(|&n| n > 0) {
            lines.push(ModalLine::new(LineStyle::Body, format!("{} want to read", group_thousands(count))));
        }
        if let Some(count) = book.currently_reading_count.filter(|&n| n > 0) {
            lines.push(ModalLine::new(
                LineStyle::Body,
                format!("{} currently reading", group_thousands(count)),
            ));
        }

        let cover = match book.cover_i {
            Some(id) if !modal.cover_failed => self.client().cover_url(id, CoverSize::Large),
            _ => COVER_PLACEHOLDER.to_string(),
        };
        lines.push(ModalLine::new(LineStyle::Link, format!("Cover: {cover}")));

        if let Some(description) = modal.details.as_ref().and_then(|d| d.description_text()) {
            lines.push(ModalLine::new(LineStyle::Heading, "Description"));
            lines.push(ModalLine::new(LineStyle::Body, truncate_text(description, DESCRIPTION_LIMIT)));
        }

        if let Some(subjects) = book.subject.as_ref().filter(|s| !s.is_empty()) {
            lines.push(ModalLine::new(LineStyle::Heading, "Subjects"));
            let shown: Vec<&str> = subjects.iter().take(SUBJECT_LIMIT).map(String::as_str).collect();
            lines.push(ModalLine::new(LineStyle::Body, shown.join(", ")));
        }

        if let Some(publishers) = book.publisher.as_ref().filter(|p| !p.is_empty()) {
            lines.push(ModalLine::new(LineStyle::Heading, "Publishers"));
            let shown: Vec<&str> = publishers.iter().take(PUBLISHER_LIMIT).map(String::as_str).collect();
            lines.push(ModalLine::new(LineStyle::Body, shown.join(", ")));
        }

        if !modal.authors.is_empty() {
            let heading = if modal.authors.len() == 1 {
                "About the Author"
            } else {
                "About the Authors"
            };
            lines.push(ModalLine::new(LineStyle::Heading, heading));
            for (index, author) in modal.authors.iter().enumerate() {
                let style = if index == modal.author_cursor {
                    LineStyle::Selected
                } else {
                    LineStyle::Accent
                };
                lines.push(ModalLine::new(style, author.name.clone()));
                if let Some(bio) = author.bio_text() {
                    lines.push(ModalLine::new(LineStyle::Body, truncate_text(bio, BIO_PREVIEW_LIMIT)));
                }
            }
        }

        let footer = if modal.authors.is_empty() {
            "Esc: close"
        } else {
            "←/→: author  Enter: author timeline  Esc: close"
        };

        ModalView {
            title: book.title.clone(),
            loading: modal.is_loading(),
            lines,
            footer: footer.to_string(),
        }
    }

    fn timeline_view(&self, timeline: &AuthorTimeline) -> ModalView {
        let mut lines = Vec::new();

        if let Some(author) = &timeline.author {
            if let Some(lifespan) = author.lifespan() {
                lines.push(ModalLine::new(LineStyle::Dim, lifespan));
            }
            if let Some(bio) = author.bio_text() {
                lines.push(ModalLine::new(LineStyle::Heading, "Biography"));
                lines.push(ModalLine::new(LineStyle::Body, truncate_text(bio, DESCRIPTION_LIMIT)));
            }
        }

        if !timeline.is_loading() {
            lines.push(ModalLine::new(LineStyle::Heading, "Published Works"));
            if timeline.works.is_empty() {
                lines.push(ModalLine::new(LineStyle::Dim, "No works found for this author."));
            }
            for work in &timeline.works {
                let year = work
                    .year()
                    .map_or_else(|| "Unknown".to_string(), |year| year.to_string());
                let title = work.title.as_deref().unwrap_or_default();
                lines.push(ModalLine::new(LineStyle::Body, format!("{year:>7}  {title}")));
                if let Some(cover) = work.first_cover().filter(|c| !timeline.failed_covers.contains(c)) {
                    lines.push(ModalLine::new(
                        LineStyle::Link,
                        format!("         {}", self.client().cover_url(cover, CoverSize::Small)),
                    ));
                }
            }
        }

        let name = timeline
            .author
            .as_ref()
            .map_or(timeline.name.as_str(), |author| author.name.as_str());

        ModalView {
            title: name.to_string(),
            loading: timeline.is_loading(),
            lines,
            footer: "Esc: back to book".to_string(),
        }
    }
}

/// Compact gallery card for a book.
fn book_card(book: &Book, is_selected: bool) -> CardItem {
    let mut lines = vec![book.authors_line().unwrap_or_else(|| "Unknown author".to_string())];
    if let Some(year) = book.first_publish_year {
        lines.push(year.to_string());
    }
    if let Some(average) = book.ratings_average {
        lines.push(format!("★ {average:.1}"));
    }

    CardItem {
        title: book.title.clone(),
        lines,
        is_selected,
        highlight_ranges: vec![],
    }
}

/// Keeps the blocks that fit in `rows`, scrolled so the focused block is shown.
fn fit_blocks(blocks: Vec<CatalogBlock>, rows: usize) -> Vec<CatalogBlock> {
    let focused = blocks.iter().position(CatalogBlock::is_focused).unwrap_or(0);

    let mut start = 0;
    while start < focused
        && blocks[start..=focused].iter().map(CatalogBlock::height).sum::<usize>() > rows
    {
        start += 1;
    }

    let mut used = 0;
    blocks
        .into_iter()
        .skip(start)
        .enumerate()
        .take_while(|(index, block)| {
            used += block.height();
            *index == 0 || used <= rows
        })
        .map(|(_, block)| block)
        .collect()
}

/// `"12k books"` badge for a genre tile.
fn format_book_count(count: u64) -> String {
    format!("{:.0}k books", count as f64 / 1000.0)
}

/// `1234567` → `"1,234,567"`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::CARD_HEIGHT;

    fn gallery(title: &str, is_focused: bool) -> CatalogBlock {
        CatalogBlock::Gallery(GalleryView {
            title: title.to_string(),
            cards: vec![],
            offset: 0,
            is_focused,
            loading: false,
        })
    }

    #[test]
    fn book_counts_round_to_thousands() {
        assert_eq!(format_book_count(12_345), "12k books");
        assert_eq!(format_book_count(1_600), "2k books");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn focused_block_scrolls_into_view() {
        let blocks = vec![gallery("a", false), gallery("b", false), gallery("c", true)];
        let rows = (CARD_HEIGHT + 2) * 2;

        let fitted = fit_blocks(blocks, rows);
        let titles: Vec<_> = fitted
            .iter()
            .map(|block| match block {
                CatalogBlock::Gallery(g) => g.title.as_str(),
                CatalogBlock::Genres(_) => "genres",
            })
            .collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn first_block_is_kept_on_tiny_screens() {
        let fitted = fit_blocks(vec![gallery("a", true), gallery("b", false)], 3);
        assert_eq!(fitted.len(), 1);
    }

    #[test]
    fn card_shows_unknown_author_when_missing() {
        let book = Book {
            key: "/works/OL1W".to_string(),
            title: "Dune".to_string(),
            first_publish_year: Some(1965),
            ..Book::default()
        };
        let card = book_card(&book, true);
        assert_eq!(card.lines, vec!["Unknown author".to_string(), "1965".to_string()]);
        assert!(card.is_selected);
    }
}
