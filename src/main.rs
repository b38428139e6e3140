//! Zellij plugin wrapper and entry point.
//!
//! The thin layer between the BookScope library and the Zellij host: it maps
//! host events to library [`Event`]s, executes the returned [`Action`]s, and
//! renders. All HTTP goes through the host's `web_request`; the request id
//! rides in the context map and comes back with `WebRequestResult`.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: request `WebAccess`; on grant the screen mounts and
//!    issues its startup requests
//! 3. **Update**: map keys and responses to events, execute actions
//! 4. **Render**: record the pane width, draw the view model
//!
//! # Keybindings
//!
//! Normal mode:
//! - `/`: focus the search or filter box
//! - `Tab` / `Shift+Tab`: next / previous section or tab
//! - arrows or `h`/`j`/`k`/`l`: move
//! - `[` / `]`: scroll the focused gallery
//! - `Enter`: open; `Esc`: close the topmost overlay
//! - `a`: author timeline (book modal)
//! - `f`: featured pick, `r`: reroll, `L`: next language (trivia)
//! - `q`: hide the plugin
//!
//! Typing mode:
//! - printable keys edit the text, `Backspace` deletes
//! - `Enter` submits, `Esc` leaves the box, `Ctrl+u` clears it

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use bookscope::api::{FetchRequest, HttpResponse, RequestId};
use bookscope::{handle_event, Action, Config, Event};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: bookscope::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookscope::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookscope::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(app = ?config.app, language = %config.language, "parsed configuration");
        self.app = bookscope::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => match permissions {
                PermissionStatus::Granted => {
                    tracing::debug!("web access granted");
                    Event::Mounted
                }
                PermissionStatus::Denied => Event::PermissionDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.resize(cols);
        bookscope::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.bare_key == BareKey::Char('u') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::ClearInput);
        }
        if key.bare_key == BareKey::Tab && key.has_modifiers(&[KeyModifier::Shift]) {
            return Some(Event::PrevSection);
        }

        if self.app.is_typing() {
            return Some(match key.bare_key {
                BareKey::Enter => Event::Select,
                BareKey::Esc => Event::Back,
                BareKey::Backspace => Event::Backspace,
                BareKey::Up => Event::Up,
                BareKey::Down => Event::Down,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Up | BareKey::Char('k') => Event::Up,
            BareKey::Down | BareKey::Char('j') => Event::Down,
            BareKey::Left | BareKey::Char('h') => Event::Left,
            BareKey::Right | BareKey::Char('l') => Event::Right,
            BareKey::Tab => Event::NextSection,
            BareKey::Char('[') => Event::PageLeft,
            BareKey::Char(']') => Event::PageRight,
            BareKey::Enter => Event::Select,
            BareKey::Esc => Event::Back,
            BareKey::Char('/') => Event::FocusInput,
            BareKey::Char('a') => Event::OpenAuthor,
            BareKey::Char('f') => Event::OpenFeatured,
            BareKey::Char('r') => Event::Reroll,
            BareKey::Char('L') => Event::NextLanguage,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a host response back to the request that caused it.
    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(id) = RequestId::from_context(context) else {
            tracing::debug!(status, "web response without a request id");
            return None;
        };
        tracing::debug!(request_id = id.0, status, body_len = body.len(), "web response");
        Some(Event::HttpResponse(HttpResponse { id, status, body }))
    }

    /// Translates library actions to Zellij API calls.
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(fetch) => {
                tracing::debug!(request_id = fetch.id.0, url = %fetch.url, "web request");
                web_request(
                    fetch.url.as_str(),
                    HttpVerb::Get,
                    FetchRequest::headers(),
                    vec![],
                    fetch.context(),
                );
            }
        }
    }
}
