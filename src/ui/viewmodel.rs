//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They carry no
//! business logic, only display-ready text, selection flags, and highlight
//! ranges.
//!
//! # Example
//!
//! ```rust
//! use bookscope::ui::viewmodel::{EmptyState, FooterInfo, HeaderInfo, ScreenBody, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: "BookScope".to_string(),
//!         subtitle: "Visual Book Explorer".to_string(),
//!     },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     body: ScreenBody::Loading(EmptyState {
//!         message: "Loading your literary journey...".to_string(),
//!         subtitle: String::new(),
//!     }),
//!     overlay: None,
//! };
//! assert!(vm.overlay.is_none());
//! ```

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub footer: FooterInfo,
    pub body: ScreenBody,
    /// Modal drawn over the body (book details, author timeline, trivia detail).
    pub overlay: Option<ModalView>,
}

/// Main area of the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenBody {
    /// Centered message while the startup batch is in flight.
    Loading(EmptyState),
    Catalog(CatalogView),
    Trivia(TriviaView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "Tab: section  Enter: open  q: quit").
    pub keybindings: String,
}

/// Centered two-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Text input box shared by the catalog search and the trivia filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub label: String,
    pub query: String,
    /// Shown dimmed while the query is empty.
    pub placeholder: String,
    pub is_focused: bool,
    /// Line shown under the box, e.g. `Press Enter to search for "dune"`.
    pub hint: Option<String>,
}

/// One book, character, house, or spell as a compact card or list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub title: String,
    pub lines: Vec<String>,
    pub is_selected: bool,
    /// Character ranges of `title` matched by the active filter.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Horizontally scrolling row of cards under a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub title: String,
    pub cards: Vec<CardItem>,
    /// Horizontal scroll offset in columns.
    pub offset: usize,
    pub is_focused: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreTile {
    pub label: String,
    /// Book count badge such as `"12k books"`, absent when unknown.
    pub stat: Option<String>,
    pub is_selected: bool,
    /// Genre currently shown in the collection gallery.
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreGridView {
    pub title: String,
    pub subtitle: String,
    pub tiles: Vec<GenreTile>,
    pub columns: usize,
    pub is_focused: bool,
}

/// Body lines under a card title.
pub const CARD_LINES: usize = 3;

/// Rows taken by one entry of the trivia list: title, then a summary line.
pub const LIST_ITEM_HEIGHT: usize = 2;

/// Rows above the trivia featured card: tab strip, gap, filter box.
pub const TRIVIA_CHROME: usize = 5;

/// Rows taken by a card: borders, title, body lines.
pub const CARD_HEIGHT: usize = CARD_LINES + 3;

/// Vertically stacked block of the catalog screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogBlock {
    Genres(GenreGridView),
    Gallery(GalleryView),
}

impl CatalogBlock {
    /// Rows the block occupies, trailing gap included.
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Genres(grid) => 3 + grid.tiles.len().div_ceil(grid.columns.max(1)),
            Self::Gallery(_) => CARD_HEIGHT + 2,
        }
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        match self {
            Self::Genres(grid) => grid.is_focused,
            Self::Gallery(gallery) => gallery.is_focused,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub search_bar: SearchBarInfo,
    /// Blocks that fit the screen, starting with the first one to draw.
    pub blocks: Vec<CatalogBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub label: String,
    pub count: usize,
    pub is_active: bool,
}

impl CardItem {
    /// Rows taken when drawn boxed with every line: heading, borders, title, lines.
    #[must_use]
    pub fn boxed_height(&self) -> usize {
        self.lines.len() + 4
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaView {
    pub tabs: Vec<TabInfo>,
    pub language: String,
    pub filter_bar: SearchBarInfo,
    /// Random pick of the active tab.
    pub featured: Option<CardItem>,
    /// Visible window of the filtered list.
    pub items: Vec<CardItem>,
    pub empty_state: Option<EmptyState>,
}

/// Styling of one modal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Heading,
    Body,
    Dim,
    Accent,
    /// Image or cover URL.
    Link,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalLine {
    pub style: LineStyle,
    pub text: String,
}

impl ModalLine {
    #[must_use]
    pub fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

/// Detail overlay: a title bar and a column of styled, wrapped lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub loading: bool,
    pub lines: Vec<ModalLine>,
    pub footer: String,
}

impl ModalView {
    /// Text of every line with the given style, in order.
    #[must_use]
    pub fn texts(&self, style: LineStyle) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| line.style == style)
            .map(|line| line.text.as_str())
            .collect()
    }
}
