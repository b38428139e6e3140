//! Clients for the two upstream services.
//!
//! Clients never touch the network: they build [`ApiRequest`]s and decode
//! [`Completed`] responses. The plugin shim executes the requests through the host.

pub mod catalog;
pub mod request;
pub mod trivia;

pub use catalog::CatalogClient;
pub use request::{ApiRequest, Completed, FetchRequest, HttpResponse, RequestId, RequestTracker};
pub use trivia::{TriviaClient, TriviaItem, TriviaList, TriviaResource};
