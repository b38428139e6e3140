//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin pane. It holds the
//! theme and exactly one [`Screen`]; the screen controllers own everything else.
//! View models are computed on demand from a state snapshot and the terminal
//! size.
//!
//! # Example
//!
//! ```rust
//! use bookscope::app::{AppKind, AppState};
//! use bookscope::domain::trivia::Language;
//! use bookscope::ui::theme::Theme;
//!
//! let state = AppState::new(AppKind::Catalog, Language::En, Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.header.title, "BookScope");
//! ```

use super::catalog::CatalogState;
use super::modes::{AppKind, InputMode};
use super::trivia::TriviaState;
use crate::domain::trivia::Language;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyState, FooterInfo, HeaderInfo, ScreenBody, UIViewModel};

/// Rows of chrome around the catalog body: blank, title, subtitle, border,
/// search box (3), hint, border, footer.
const CATALOG_CHROME_ROWS: usize = 10;

/// Rows of chrome around the trivia body: blank, title, subtitle, border,
/// border, footer.
const TRIVIA_CHROME_ROWS: usize = 6;

/// The screen hosted by the pane.
#[derive(Debug)]
pub enum Screen {
    Catalog(CatalogState),
    Trivia(TriviaState),
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Color scheme, resolved once from the plugin configuration.
    pub theme: Theme,
    pub screen: Screen,
    /// Set when the user refused web access; nothing can load.
    pub permission_denied: bool,
}

impl AppState {
    /// Creates the state for `kind`. `language` seeds the trivia client.
    #[must_use]
    pub fn new(kind: AppKind, language: Language, theme: Theme) -> Self {
        let screen = match kind {
            AppKind::Catalog => Screen::Catalog(CatalogState::default()),
            AppKind::Trivia => Screen::Trivia(TriviaState::new(language)),
        };
        Self {
            theme,
            screen,
            permission_denied: false,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AppKind {
        match self.screen {
            Screen::Catalog(_) => AppKind::Catalog,
            Screen::Trivia(_) => AppKind::Trivia,
        }
    }

    /// Whether printable keys currently go to a text box.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        let mode = match &self.screen {
            Screen::Catalog(catalog) => catalog.input_mode,
            Screen::Trivia(trivia) => trivia.input_mode,
        };
        mode == InputMode::Typing
    }

    /// Records the pane width; galleries clamp their scroll offsets to it.
    pub fn resize(&mut self, cols: usize) {
        if let Screen::Catalog(catalog) = &mut self.screen {
            catalog.resize(cols);
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        match &self.screen {
            Screen::Catalog(catalog) => catalog.loading,
            Screen::Trivia(trivia) => trivia.loading,
        }
    }

    /// Computes the view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let header = self.compute_header();
        let footer = self.compute_footer();

        if self.permission_denied {
            return UIViewModel {
                header,
                footer,
                body: ScreenBody::Loading(EmptyState {
                    message: "Web access was not granted".to_string(),
                    subtitle: "Reload the plugin and allow web requests to browse".to_string(),
                }),
                overlay: None,
            };
        }

        if self.is_loading() {
            return UIViewModel {
                header,
                footer,
                body: ScreenBody::Loading(self.loading_message()),
                overlay: None,
            };
        }

        let (body, overlay) = match &self.screen {
            Screen::Catalog(catalog) => (
                ScreenBody::Catalog(catalog.catalog_view(rows.saturating_sub(CATALOG_CHROME_ROWS))),
                catalog.overlay_view(),
            ),
            Screen::Trivia(trivia) => (
                ScreenBody::Trivia(trivia.trivia_view(rows.saturating_sub(TRIVIA_CHROME_ROWS))),
                trivia.overlay_view(),
            ),
        };

        UIViewModel {
            header,
            footer,
            body,
            overlay,
        }
    }

    fn loading_message(&self) -> EmptyState {
        match &self.screen {
            Screen::Catalog(_) => EmptyState {
                message: "Loading your literary journey...".to_string(),
                subtitle: "Fetching trending books and collections".to_string(),
            },
            Screen::Trivia(trivia) => EmptyState {
                message: "Summoning the archives...".to_string(),
                subtitle: format!("Loading books, characters, houses and spells ({})", trivia.language()),
            },
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        match &self.screen {
            Screen::Catalog(_) => HeaderInfo {
                title: "BookScope".to_string(),
                subtitle: "Visual Book Explorer  ·  Powered by Open Library API".to_string(),
            },
            Screen::Trivia(_) => HeaderInfo {
                title: "BookScope Trivia".to_string(),
                subtitle: "Books, characters, houses and spells  ·  Powered by PotterAPI".to_string(),
            },
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match &self.screen {
            Screen::Catalog(catalog) => {
                if catalog.input_mode == InputMode::Typing {
                    "Enter: search  Esc: done  Ctrl+u: clear"
                } else if catalog.timeline.is_some() {
                    "Esc: back to book  q: quit"
                } else if catalog.modal.is_some() {
                    "←/→: author  Enter/a: timeline  Esc: close  q: quit"
                } else {
                    "/: search  Tab/↑↓: section  ←→: move  [ ]: scroll  Enter: open  q: quit"
                }
            }
            Screen::Trivia(trivia) => {
                if trivia.input_mode == InputMode::Typing {
                    "Type to filter  Enter/Esc: done  Ctrl+u: clear"
                } else if trivia.detail.is_some() {
                    "Esc: close  q: quit"
                } else {
                    "Tab: tab  ↑↓: move  Enter: open  f: featured  r: reroll  L: language  /: filter  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
