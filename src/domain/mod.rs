//! Domain layer for the BookScope plugin.
//!
//! Record types for both upstream services and the crate error type. Nothing in
//! here knows about Zellij, HTTP, or rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`catalog`]: Open Library records and the small pure helpers around them
//! - [`trivia`]: Potter API records and the language set

pub mod catalog;
pub mod error;
pub mod trivia;

pub use catalog::{Author, AuthorWork, Book, BookDetails, CoverSize, SearchPage, TextValue};
pub use error::{BookscopeError, Result};
pub use trivia::{Character, House, Language, Spell, TriviaBook};
