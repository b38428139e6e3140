//! Event handling and state transition logic.
//!
//! [`handle_event`] is the one entry point through which the plugin shim feeds
//! key presses, permission results, and host responses into the application. It
//! routes each event to the active screen controller and returns whether a
//! re-render is needed plus the side effects to perform.
//!
//! # Example
//!
//! ```rust
//! use bookscope::app::{handle_event, Action, AppKind, AppState, Event};
//! use bookscope::domain::trivia::Language;
//! use bookscope::ui::theme::Theme;
//!
//! let mut state = AppState::new(AppKind::Trivia, Language::En, Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Mounted)?;
//! assert!(render);
//! assert_eq!(actions.iter().filter(|a| matches!(a, Action::Fetch(_))).count(), 8);
//! # Ok::<(), bookscope::domain::error::BookscopeError>(())
//! ```

use super::modes::InputMode;
use super::state::Screen;
use crate::api::HttpResponse;
use crate::app::{Action, AppState};
use crate::domain::error::Result;

/// Events produced by the plugin shim.
///
/// Key events are already mapped to intents; which intents apply depends on the
/// screen and its input mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Web access was granted; issue the startup requests.
    Mounted,
    /// Web access was refused.
    PermissionDenied,
    /// Hides the plugin pane.
    CloseFocus,

    Up,
    Down,
    Left,
    Right,
    /// Next catalog section or trivia tab.
    NextSection,
    PrevSection,
    /// Scrolls the focused gallery one card stride.
    PageLeft,
    PageRight,
    /// Enter: submit the text box, or open the focused item.
    Select,
    /// Esc: leave the text box, then close the topmost overlay.
    Back,

    /// Moves focus into the search or filter box.
    FocusInput,
    /// Appends a character to the focused text box.
    Char(char),
    /// Removes the last character of the focused text box.
    Backspace,
    /// Empties the focused text box.
    ClearInput,

    /// Opens the author timeline of the selected author in the book modal.
    OpenAuthor,
    /// Opens the detail of the active trivia tab's featured pick.
    OpenFeatured,
    /// Fetches a new featured pick for the active trivia tab.
    Reroll,
    /// Cycles the trivia language and reloads.
    NextLanguage,

    /// A host response for a request issued by one of the controllers.
    HttpResponse(HttpResponse),
}

/// Processes an event, mutates state, and returns `(should_render, actions)`.
///
/// # Errors
///
/// Returns an error if a request URL cannot be built. Fetch and decode failures
/// of responses are absorbed by the controllers.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_label(event)).entered();

    match event {
        Event::Mounted => {
            state.permission_denied = false;
            let actions = match &mut state.screen {
                Screen::Catalog(catalog) => catalog.mount()?,
                Screen::Trivia(trivia) => trivia.mount(),
            };
            tracing::info!(kind = ?state.kind(), requests = actions.len(), "plugin mounted");
            Ok((true, actions))
        }
        Event::PermissionDenied => {
            tracing::warn!("web access denied, nothing to load");
            state.permission_denied = true;
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::HttpResponse(response) => match &mut state.screen {
            Screen::Catalog(catalog) => catalog.handle_response(response.clone()),
            Screen::Trivia(trivia) => Ok((trivia.handle_response(response.clone())?, vec![])),
        },
        _ => match &mut state.screen {
            Screen::Catalog(catalog) => handle_catalog_key(catalog, event),
            Screen::Trivia(trivia) => Ok(handle_trivia_key(trivia, event)),
        },
    }
}

fn handle_catalog_key(
    catalog: &mut super::catalog::CatalogState,
    event: &Event,
) -> Result<(bool, Vec<Action>)> {
    if catalog.loading {
        return Ok((false, vec![]));
    }

    if catalog.input_mode == InputMode::Typing {
        return match event {
            Event::Char(c) => Ok((catalog.push_char(*c), vec![])),
            Event::Backspace => Ok((catalog.pop_char(), vec![])),
            Event::Select => Ok((true, catalog.submit_search()?)),
            Event::ClearInput => Ok((true, catalog.clear_search()?)),
            Event::Back => Ok((catalog.back(), vec![])),
            _ => Ok((false, vec![])),
        };
    }

    match event {
        Event::Up => Ok((catalog.move_vertical(false), vec![])),
        Event::Down => Ok((catalog.move_vertical(true), vec![])),
        Event::Left => Ok((catalog.move_horizontal(false), vec![])),
        Event::Right => Ok((catalog.move_horizontal(true), vec![])),
        Event::NextSection | Event::PrevSection => {
            if catalog.modal.is_some() {
                return Ok((false, vec![]));
            }
            catalog.cycle_section(matches!(event, Event::NextSection));
            Ok((true, vec![]))
        }
        Event::PageLeft => Ok((catalog.page(false), vec![])),
        Event::PageRight => Ok((catalog.page(true), vec![])),
        Event::Select => Ok((true, catalog.select()?)),
        Event::OpenAuthor => {
            if catalog.modal.is_none() || catalog.timeline.is_some() {
                return Ok((false, vec![]));
            }
            Ok((true, catalog.open_timeline()?))
        }
        Event::Back => Ok((catalog.back(), vec![])),
        Event::FocusInput => {
            catalog.focus_search();
            Ok((true, vec![]))
        }
        Event::ClearInput => Ok((true, catalog.clear_search()?)),
        _ => Ok((false, vec![])),
    }
}

fn handle_trivia_key(trivia: &mut super::trivia::TriviaState, event: &Event) -> (bool, Vec<Action>) {
    if trivia.loading {
        return (false, vec![]);
    }

    if trivia.input_mode == InputMode::Typing {
        return match event {
            Event::Char(c) => (trivia.push_char(*c), vec![]),
            Event::Backspace => (trivia.pop_char(), vec![]),
            Event::ClearInput => {
                trivia.clear_filter();
                (true, vec![])
            }
            Event::Select | Event::Back => (trivia.back(), vec![]),
            Event::Up => (trivia.move_cursor(false), vec![]),
            Event::Down => (trivia.move_cursor(true), vec![]),
            _ => (false, vec![]),
        };
    }

    match event {
        Event::Up => (trivia.move_cursor(false), vec![]),
        Event::Down => (trivia.move_cursor(true), vec![]),
        Event::NextSection | Event::Right | Event::PrevSection | Event::Left => {
            if trivia.detail.is_some() {
                return (false, vec![]);
            }
            trivia.cycle_tab(matches!(event, Event::NextSection | Event::Right));
            (true, vec![])
        }
        Event::Select => (true, trivia.open_detail()),
        Event::OpenFeatured => (true, trivia.open_featured()),
        Event::Back => (trivia.back(), vec![]),
        Event::FocusInput => {
            trivia.focus_filter();
            (true, vec![])
        }
        Event::ClearInput => {
            trivia.clear_filter();
            (true, vec![])
        }
        Event::Reroll => (false, trivia.reroll()),
        Event::NextLanguage => (true, trivia.change_language()),
        _ => (false, vec![]),
    }
}

/// Span label that keeps response bodies out of the logs.
fn event_label(event: &Event) -> String {
    match event {
        Event::HttpResponse(response) => {
            format!("HttpResponse(id={}, status={})", response.id.0, response.status)
        }
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::AppKind;
    use crate::domain::trivia::Language;
    use crate::ui::theme::Theme;

    fn catalog_state() -> AppState {
        AppState::new(AppKind::Catalog, Language::En, Theme::default())
    }

    #[test]
    fn keys_are_ignored_while_loading() {
        let mut state = catalog_state();
        let (render, actions) = handle_event(&mut state, &Event::Down).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn quit_closes_focus() {
        let mut state = catalog_state();
        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert_eq!(actions, vec![Action::CloseFocus]);
    }

    #[test]
    fn denied_permission_shows_notice() {
        let mut state = catalog_state();
        handle_event(&mut state, &Event::PermissionDenied).unwrap();
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(
            vm.body,
            crate::ui::viewmodel::ScreenBody::Loading(ref empty) if empty.message.contains("not granted")
        ));
    }

    #[test]
    fn catalog_mount_issues_startup_shelves_and_stats() {
        let mut state = catalog_state();
        let (_, actions) = handle_event(&mut state, &Event::Mounted).unwrap();
        // trending + fiction, three shelves, six genre counts
        assert_eq!(actions.len(), 2 + 3 + 6);
    }

    #[test]
    fn response_bodies_stay_out_of_span_labels() {
        let event = Event::HttpResponse(HttpResponse {
            id: crate::api::RequestId(4),
            status: 200,
            body: b"{\"secret\":true}".to_vec(),
        });
        assert_eq!(event_label(&event), "HttpResponse(id=4, status=200)");
    }
}
