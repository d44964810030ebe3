//! Endpoint records and the candidate predicate.

use serde::{Deserialize, Serialize};

/// Persisted incident state for one monitored URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    /// Unique key; the URL that gets probed.
    pub url: String,
    /// True while the endpoint is believed to be failing.
    pub incident_active: bool,
}

impl EndpointRecord {
    pub fn new(url: impl Into<String>, incident_active: bool) -> Self {
        Self {
            url: url.into(),
            incident_active,
        }
    }

    /// A record in the healthy state.
    pub fn healthy(url: impl Into<String>) -> Self {
        Self::new(url, false)
    }

    /// A record with an open incident.
    pub fn failing(url: impl Into<String>) -> Self {
        Self::new(url, true)
    }
}

/// Whether a ledger key is monitored.
///
/// Keys are matched on a plain `http` prefix, which covers both `http://` and
/// `https://`. Anything else is skipped without error; no stricter URL
/// validation happens here.
pub fn is_candidate_key(key: &str) -> bool {
    key.starts_with("http")
}
