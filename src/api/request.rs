//! Request descriptors, response envelopes, and in-flight request tracking.
//!
//! The plugin never performs I/O itself: API clients describe a GET as an
//! [`ApiRequest`], controllers register it with a [`RequestTracker`] which assigns a
//! [`RequestId`], and the plugin shim hands the resulting [`FetchRequest`] to the
//! Zellij host. The id travels in the request context map and comes back with the
//! `WebRequestResult` event, where [`RequestTracker::resolve`] pairs it with the
//! pending entry that caused it.

use crate::domain::error::{BookscopeError, Result};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};

/// Context map key carrying the request id through the host.
pub const REQUEST_ID_KEY: &str = "bookscope_request_id";

/// Identifier of one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl RequestId {
    /// Recovers the id from a `WebRequestResult` context map.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        context
            .get(REQUEST_ID_KEY)
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Self)
    }
}

/// A GET request described by an API client, not yet issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Absolute URL to fetch.
    pub url: String,
    /// Path relative to the service base, used in error messages.
    pub endpoint: String,
}

impl ApiRequest {
    /// A GET against an absolute image URL, only to learn whether it loads.
    #[must_use]
    pub fn probe(url: String) -> Self {
        Self {
            endpoint: url.clone(),
            url,
        }
    }
}

/// A request ready for the host, tagged with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub url: String,
}

impl FetchRequest {
    /// Context map sent alongside the request.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(REQUEST_ID_KEY.to_string(), self.id.0.to_string())])
    }

    /// Request headers; both services serve JSON.
    #[must_use]
    pub fn headers() -> BTreeMap<String, String> {
        BTreeMap::from([("Accept".to_string(), "application/json".to_string())])
    }
}

/// Raw response delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub id: RequestId,
    pub status: u16,
    pub body: Vec<u8>,
}

/// A response matched to its request, ready to decode.
#[derive(Debug, Clone)]
pub struct Completed {
    pub endpoint: String,
    pub status: u16,
    pub body: Vec<u8>,
}

impl Completed {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decodes the body, failing with a fetch error on a non-success status.
    ///
    /// # Errors
    ///
    /// Returns [`BookscopeError::Fetch`] for non-2xx statuses and
    /// [`BookscopeError::Decode`] when the body is not the expected JSON.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_success() {
            return Err(BookscopeError::fetch(self.endpoint.clone(), self.status));
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Succeeds when the status is 2xx, ignoring the body.
    ///
    /// # Errors
    ///
    /// Returns [`BookscopeError::Fetch`] for non-2xx statuses.
    pub fn ensure_success(&self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(BookscopeError::fetch(self.endpoint.clone(), self.status))
        }
    }
}

#[derive(Debug, Clone)]
struct Pending<K> {
    endpoint: String,
    kind: K,
}

/// Allocates request ids and remembers what each in-flight request is for.
///
/// `K` is the controller's own description of the pending fetch (which slot it
/// fills, which generation it belongs to).
#[derive(Debug, Clone)]
pub struct RequestTracker<K> {
    next_id: u64,
    pending: HashMap<RequestId, Pending<K>>,
}

impl<K> Default for RequestTracker<K> {
    fn default() -> Self {
        Self {
            next_id: 1,
            pending: HashMap::new(),
        }
    }
}

impl<K> RequestTracker<K> {
    /// Registers `request` as pending and returns the descriptor for the host.
    pub fn issue(&mut self, request: ApiRequest, kind: K) -> FetchRequest {
        let id = RequestId(self.next_id);
        self.next_id += 1;

        tracing::debug!(request_id = id.0, endpoint = %request.endpoint, "issuing request");

        self.pending.insert(
            id,
            Pending {
                endpoint: request.endpoint,
                kind,
            },
        );

        FetchRequest { id, url: request.url }
    }

    /// Pairs a host response with its pending entry, removing it.
    ///
    /// Returns `None` for ids this tracker never issued.
    pub fn resolve(&mut self, response: HttpResponse) -> Option<(K, Completed)> {
        let Some(pending) = self.pending.remove(&response.id) else {
            tracing::debug!(request_id = response.id.0, "response for unknown request");
            return None;
        };

        Some((
            pending.kind,
            Completed {
                endpoint: pending.endpoint,
                status: response.status,
                body: response.body,
            },
        ))
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(endpoint: &str) -> ApiRequest {
        ApiRequest {
            url: format!("https://example.org{endpoint}"),
            endpoint: endpoint.to_string(),
        }
    }

    #[test]
    fn ids_round_trip_through_context() {
        let mut tracker = RequestTracker::default();
        let fetch = tracker.issue(request("/books"), "books");

        assert_eq!(RequestId::from_context(&fetch.context()), Some(fetch.id));
        assert_eq!(tracker.in_flight(), 1);
    }

    #[test]
    fn resolve_matches_and_forgets() {
        let mut tracker = RequestTracker::default();
        let fetch = tracker.issue(request("/books"), 7_u8);

        let response = HttpResponse {
            id: fetch.id,
            status: 200,
            body: b"[1, 2]".to_vec(),
        };
        let (kind, completed) = tracker.resolve(response.clone()).unwrap();
        assert_eq!(kind, 7);
        assert_eq!(completed.decode::<Vec<u8>>().unwrap(), vec![1, 2]);

        assert!(tracker.resolve(response).is_none());
    }

    #[test]
    fn non_success_status_is_a_fetch_error() {
        let completed = Completed {
            endpoint: "/houses".to_string(),
            status: 500,
            body: b"oops".to_vec(),
        };
        let err = completed.decode::<Vec<u8>>().unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch /houses: Internal Server Error");
    }
}
