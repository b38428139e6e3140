//! Screen, input, and focus state types.
//!
//! The plugin hosts one of two screens, chosen at load time. Within a screen
//! the [`InputMode`] decides whether printable keys are typed into the text
//! field or interpreted as commands.

use crate::domain::error::BookscopeError;
use std::str::FromStr;

/// Which application the plugin pane runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppKind {
    /// Library catalog explorer.
    #[default]
    Catalog,
    /// Fiction-trivia browser.
    Trivia,
}

impl FromStr for AppKind {
    type Err = BookscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "catalog" => Ok(Self::Catalog),
            "trivia" => Ok(Self::Trivia),
            other => Err(BookscopeError::Config(format!("unknown app: {other}"))),
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are commands: navigation, selection, quit.
    #[default]
    Normal,

    /// Keys edit the search (catalog) or filter (trivia) text.
    ///
    /// Enter submits, Esc returns to [`InputMode::Normal`] keeping the text.
    Typing,
}

/// Focusable block of the catalog screen.
///
/// With search results present only [`CatalogSection::Results`] is shown.
/// Otherwise the screen reads top to bottom: genre grid, trending gallery,
/// the selected genre's collection, then the featured shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSection {
    Genres,
    Results,
    Trending,
    Collection,
    Shelf(usize),
}
