//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event, so
//! several effects can be queued at once. The plugin shim executes them in
//! order; nothing in the library performs I/O itself.

use crate::api::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly asks to leave (pressing `q`).
    CloseFocus,

    /// Issues a GET through the host.
    ///
    /// The response comes back as a `WebRequestResult` whose context carries the
    /// request id, and is fed back in as [`crate::app::Event::HttpResponse`].
    Fetch(FetchRequest),
}
