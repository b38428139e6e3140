//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin shim (`main.rs`) and the API clients. It
//! is free of Zellij calls so it can be driven natively in tests.
//!
//! # Architecture
//!
//! ```text
//! Key / permission → Event → handle_event → controller → Vec<Action>
//!                              ↑                              ↓
//!                              └──── WebRequestResult ←── host fetch
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`batch`]: Generation tokens and settle-all request batches
//! - [`catalog`]: Library catalog screen controller
//! - [`gallery`]: Horizontal gallery scroll state
//! - [`handler`]: Event routing to the active screen
//! - [`modes`]: Screen, input, and focus types
//! - [`state`]: Top-level state container and view model computation
//! - [`trivia`]: Fiction-trivia screen controller

pub mod actions;
pub mod batch;
pub mod catalog;
pub mod gallery;
pub mod handler;
pub mod modes;
pub mod state;
pub mod trivia;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{AppKind, CatalogSection, InputMode};
pub use state::{AppState, Screen};
