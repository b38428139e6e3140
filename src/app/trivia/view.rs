//! View model computation for the trivia screen.

use super::{TriviaDetail, TriviaState, BOOK_PLACEHOLDER, CHARACTER_PLACEHOLDER};
use crate::api::trivia::{TriviaItem, TriviaResource};
use crate::app::modes::InputMode;
use crate::domain::trivia::{Character, House, Spell, TriviaBook};
use crate::ui::viewmodel::{
    CardItem, EmptyState, LineStyle, ModalLine, ModalView, SearchBarInfo, TabInfo, TriviaView,
    LIST_ITEM_HEIGHT, TRIVIA_CHROME,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const CHILDREN_PREVIEW: usize = 3;
const TRAITS_PREVIEW: usize = 4;

impl TriviaState {
    /// Trivia body for a viewport of `rows` body lines.
    ///
    /// The list window is centered on the cursor.
    #[must_use]
    pub fn trivia_view(&self, rows: usize) -> TriviaView {
        let tabs = TriviaResource::ALL
            .iter()
            .map(|&resource| TabInfo {
                label: resource.label().to_string(),
                count: self.count(resource),
                is_active: resource == self.tab,
            })
            .collect();

        let featured = self.featured.get(&self.tab).map(|item| {
            let mut card = item_card(item);
            card.title = format!("Featured: {}", card.title);
            card
        });

        let featured_rows = featured.as_ref().map_or(0, CardItem::boxed_height);
        let capacity = rows.saturating_sub(TRIVIA_CHROME + featured_rows) / LIST_ITEM_HEIGHT;
        let items = self.list_window(capacity.max(1));

        let empty_state = self.visible().is_empty().then(|| {
            if self.filter.is_empty() {
                EmptyState {
                    message: format!("No {} available", self.tab.label().to_lowercase()),
                    subtitle: "Press r to try a random pick or L to switch language".to_string(),
                }
            } else {
                EmptyState {
                    message: format!("No {} match \"{}\"", self.tab.label().to_lowercase(), self.filter),
                    subtitle: "Press Esc to clear the filter".to_string(),
                }
            }
        });

        TriviaView {
            tabs,
            language: self.language().code().to_uppercase(),
            filter_bar: SearchBarInfo {
                label: "Filter".to_string(),
                query: self.filter.clone(),
                placeholder: format!("Filter {}...", self.tab.label().to_lowercase()),
                is_focused: self.input_mode == InputMode::Typing,
                hint: None,
            },
            featured,
            items,
            empty_state,
        }
    }

    fn list_window(&self, capacity: usize) -> Vec<CardItem> {
        let visible = self.visible();
        let mut start = self.cursor.saturating_sub(capacity / 2);
        let end = (start + capacity).min(visible.len());
        if end - start < capacity && visible.len() >= capacity {
            start = end.saturating_sub(capacity);
        }

        let matcher = (!self.filter.trim().is_empty()).then(|| SkimMatcherV2::default().ignore_case());

        visible[start..end]
            .iter()
            .enumerate()
            .filter_map(|(offset, &index)| {
                let item = self.item_at(index)?;
                let mut card = item_card(&item);
                card.is_selected = start + offset == self.cursor && self.detail.is_none();
                if let Some(m) = matcher.as_ref() {
                    card.highlight_ranges = highlight_ranges(m, &card.title, &self.filter);
                }
                Some(card)
            })
            .collect()
    }

    /// Detail overlay, when open.
    #[must_use]
    pub fn overlay_view(&self) -> Option<ModalView> {
        self.detail.as_ref().map(detail_view)
    }
}

/// Card for any trivia record.
#[must_use]
pub fn item_card(item: &TriviaItem) -> CardItem {
    let (title, lines) = match item {
        TriviaItem::Book(book) => (book.title.clone(), book_lines(book)),
        TriviaItem::Character(character) => (character.full_name.clone(), character_lines(character)),
        TriviaItem::House(house) => (format!("{} {}", house.emoji, house.house), house_lines(house)),
        TriviaItem::Spell(spell) => (spell.spell.clone(), spell_lines(spell)),
    };
    CardItem {
        title,
        lines,
        is_selected: false,
        highlight_ranges: vec![],
    }
}

fn book_lines(book: &TriviaBook) -> Vec<String> {
    vec![
        format!("Book #{}", book.number),
        format!("{}  ·  {} pages", book.release_date, book.pages),
        book.description.clone(),
    ]
}

fn character_lines(character: &Character) -> Vec<String> {
    let mut lines = Vec::new();
    if !character.hogwarts_house.is_empty() {
        lines.push(character.hogwarts_house.clone());
    }
    if !character.nickname.is_empty() {
        lines.push(format!("\"{}\"", character.nickname));
    }
    if !character.interpreted_by.is_empty() {
        lines.push(format!("Played by {}", character.interpreted_by));
    }
    if !character.birthdate.is_empty() {
        lines.push(format!("Born {}", character.birthdate));
    }
    if !character.children.is_empty() {
        let shown = character.children.iter().take(CHILDREN_PREVIEW).cloned().collect::<Vec<_>>();
        let mut line = format!("Children: {}", shown.join(", "));
        let rest = character.children.len().saturating_sub(CHILDREN_PREVIEW);
        if rest > 0 {
            line.push_str(&format!(" +{rest} more"));
        }
        lines.push(line);
    }
    lines
}

fn house_lines(house: &House) -> Vec<String> {
    let traits: Vec<&str> = house.traits.iter().take(TRAITS_PREVIEW).map(String::as_str).collect();
    vec![
        format!("Founded by {}", house.founder),
        house.colors.join(", "),
        format!("{} • {}", house.animal, house.element),
        format!("House Traits: {}", traits.join(", ")),
    ]
}

fn spell_lines(spell: &Spell) -> Vec<String> {
    vec!["Spell".to_string(), spell.usage.clone()]
}

fn detail_view(detail: &TriviaDetail) -> ModalView {
    let mut lines = Vec::new();
    let title = match &detail.item {
        TriviaItem::Book(book) => {
            lines.push(ModalLine::new(LineStyle::Accent, format!("Book #{}", book.number)));
            if !book.original_title.is_empty() && book.original_title != book.title {
                lines.push(ModalLine::new(LineStyle::Dim, book.original_title.clone()));
            }
            lines.push(ModalLine::new(LineStyle::Body, format!("Release Date: {}", book.release_date)));
            lines.push(ModalLine::new(LineStyle::Body, format!("Pages: {}", book.pages)));
            lines.push(ModalLine::new(LineStyle::Heading, "Description:"));
            lines.push(ModalLine::new(LineStyle::Body, book.description.clone()));
            let cover = if detail.image_failed { BOOK_PLACEHOLDER } else { book.cover.as_str() };
            lines.push(ModalLine::new(LineStyle::Link, format!("Cover: {cover}")));
            book.title.clone()
        }
        TriviaItem::Character(character) => {
            if !character.nickname.is_empty() {
                lines.push(ModalLine::new(LineStyle::Accent, format!("\"{}\"", character.nickname)));
            }
            for (label, value) in [
                ("House", &character.hogwarts_house),
                ("Portrayed by", &character.interpreted_by),
                ("Birth Date", &character.birthdate),
            ] {
                if !value.is_empty() {
                    lines.push(ModalLine::new(LineStyle::Body, format!("{label}: {value}")));
                }
            }
            if !character.children.is_empty() {
                lines.push(ModalLine::new(LineStyle::Heading, "Children:"));
                lines.push(ModalLine::new(LineStyle::Body, character.children.join(", ")));
            }
            let image = if detail.image_failed {
                CHARACTER_PLACEHOLDER
            } else {
                character.image.as_str()
            };
            lines.push(ModalLine::new(LineStyle::Link, format!("Image: {image}")));
            character.full_name.clone()
        }
        TriviaItem::House(house) => {
            lines.push(ModalLine::new(LineStyle::Accent, format!("Founded by {}", house.founder)));
            lines.push(ModalLine::new(LineStyle::Body, format!("House Colors: {}", house.colors.join(", "))));
            lines.push(ModalLine::new(LineStyle::Body, format!("House Animal: {}", house.animal)));
            lines.push(ModalLine::new(LineStyle::Body, format!("Element: {}", house.element)));
            lines.push(ModalLine::new(LineStyle::Heading, "House Traits:"));
            lines.push(ModalLine::new(LineStyle::Body, house.traits.join(", ")));
            format!("{} {}", house.emoji, house.house)
        }
        TriviaItem::Spell(spell) => {
            lines.push(ModalLine::new(LineStyle::Heading, "Details"));
            lines.push(ModalLine::new(LineStyle::Body, spell.usage.clone()));
            spell.spell.clone()
        }
    };

    ModalView {
        title,
        loading: false,
        lines,
        footer: "Esc: close".to_string(),
    }
}

/// Character ranges of `text` matched by `query`, coalesced into runs.
/// Union of the fuzzy matches of every filter token in `text`, as merged
/// character ranges. Matching ignores case, the same as the filter.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    let mut indices: Vec<usize> = query
        .split_whitespace()
        .filter_map(|token| matcher.fuzzy_indices(text, &token.to_lowercase()))
        .flat_map(|(_score, indices)| indices)
        .collect();
    indices.sort_unstable();
    indices.dedup();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
