//! BookScope: a Zellij plugin for browsing books from the terminal.
//!
//! One plugin, two screens, picked with the `app` configuration option:
//! - **catalog**: an Open Library explorer with trending books, a genre
//!   landscape, per-genre collections, free-text search, book details, and
//!   author timelines
//! - **trivia**: a fiction-trivia browser over the Potter API with books,
//!   characters, houses, and spells in six languages

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key mapping, web_request, WebRequestResult       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, screen controllers               │
//! │  - Generation tokens, settle-all batches            │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────────────┐       ┌───────────────────────┐
//! │ UI Layer (ui/)        │       │ API Layer (api/)      │
//! │ - Rendering           │       │ - URL building        │
//! │ - Theming             │       │ - Request tracking    │
//! │ - Components          │       │ - Response decoding   │
//! └───────────────────────┘       └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Catalog and trivia records (domain/)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library performs no I/O of its own beyond the log file. Controllers
//! return [`Action::Fetch`] descriptors; the shim hands them to the host and
//! feeds the responses back as [`Event::HttpResponse`].
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookscope.wasm" {
//!         app "trivia"
//!         language "es"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bookscope::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::Mounted)?;
//! for action in actions {
//!     if let Action::Fetch(fetch) = action {
//!         // hand fetch.url to the host, answer with Event::HttpResponse
//!         assert!(fetch.url.starts_with("https://openlibrary.org/"));
//!     }
//! }
//! # Ok::<(), bookscope::BookscopeError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppKind, AppState, Event};
pub use domain::{BookscopeError, Language, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/bookscope.wasm" {
///     app "catalog"
///     language "en"
///     theme "catppuccin-mocha"
///     theme_file "~/themes/custom.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Screen hosted by the pane. Default: catalog.
    pub app: AppKind,

    /// Initial trivia language. Default: `en`.
    pub language: Language,

    /// Built-in theme name.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Log filter directive, e.g. `debug` or `bookscope=trace`. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown `app` or `language` values are logged and replaced by their
    /// defaults; nothing here fails.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookscope::{AppKind, Config, Language};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("app".to_string(), "trivia".to_string());
    /// map.insert("language".to_string(), "fr".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.app, AppKind::Trivia);
    /// assert_eq!(config.language, Language::Fr);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let app = config
            .get("app")
            .map_or(Ok(AppKind::default()), |raw| raw.parse::<AppKind>())
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid app option, using catalog");
                AppKind::default()
            });

        let language = config
            .get("language")
            .map_or(Ok(Language::default()), |raw| raw.parse::<Language>())
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid language option, using en");
                Language::default()
            });

        Self {
            app,
            language,
            theme_name: non_empty(config.get("theme")),
            theme_file: non_empty(config.get("theme_file")),
            trace_level: non_empty(config.get("trace_level")),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Builds the initial [`AppState`] for `config`.
///
/// The theme is resolved from `theme_file`, then `theme_name`, then the
/// default; a theme that fails to load is logged and skipped.
///
/// ```rust
/// use bookscope::{initialize, AppKind, Config};
///
/// let config = Config {
///     app: AppKind::Trivia,
///     theme_name: Some("catppuccin-frappe".to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config);
/// assert_eq!(state.kind(), AppKind::Trivia);
/// assert_eq!(state.theme.name, "catppuccin-frappe");
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(app = ?config.app, language = %config.language, "initializing bookscope plugin");

    AppState::new(config.app, config.language, resolve_theme(config))
}

fn resolve_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => return theme,
            Err(e) => {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file");
            }
        }
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}
