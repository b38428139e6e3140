//! Error types for the BookScope plugin.
//!
//! This module defines the centralized error type [`BookscopeError`] and a type alias
//! [`Result`] used throughout the crate. Every fetch failure, whether the upstream
//! answered with a non-success status or returned a body that does not decode, ends
//! up as one of these variants and is handled uniformly by the controllers.

use thiserror::Error;

/// The main error type for BookScope operations.
///
/// # Examples
///
/// ```
/// use bookscope::BookscopeError;
///
/// let err = BookscopeError::Fetch {
///     endpoint: "/books".to_string(),
///     status: "Not Found".to_string(),
/// };
/// assert_eq!(err.to_string(), "Failed to fetch /books: Not Found");
/// ```
#[derive(Debug, Error)]
pub enum BookscopeError {
    /// The upstream answered with a non-success HTTP status.
    ///
    /// `endpoint` is the request path relative to the service base, `status` is
    /// the canonical reason phrase (or the numeric code when none is known).
    #[error("Failed to fetch {endpoint}: {status}")]
    Fetch {
        /// Endpoint path that failed.
        endpoint: String,
        /// Status text of the failed response.
        status: String,
    },

    /// The response body could not be decoded into the expected record.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request URL could not be built.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BookscopeError {
    /// Builds a [`BookscopeError::Fetch`] from an endpoint and a raw status code.
    ///
    /// The status text is the canonical reason phrase when `http` knows one.
    #[must_use]
    pub fn fetch(endpoint: impl Into<String>, status: u16) -> Self {
        let status = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .map_or_else(|| status.to_string(), ToString::to_string);

        Self::Fetch {
            endpoint: endpoint.into(),
            status,
        }
    }
}

/// A specialized `Result` type for BookScope operations.
pub type Result<T> = std::result::Result<T, BookscopeError>;
