//! Probe outcome classification.

use serde::Serialize;
use thiserror::Error;

/// Status code reported when no HTTP response was received.
pub const TRANSPORT_FAILURE_STATUS: i32 = -1;

/// The only status code treated as healthy.
pub const HEALTHY_STATUS: i32 = 200;

/// Why a probe produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TransportError {
    /// The request did not complete within the probe timeout.
    #[error("Timeout limit reached")]
    Timeout,

    /// Connection refused, host unreachable or DNS failure.
    #[error("Connection Refused")]
    ConnectionRefused,

    /// Any other transport failure (TLS, malformed response, redirect loop...).
    #[error("{0}")]
    Other(String),
}

/// Result of probing one endpoint once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    /// HTTP status code, or `-1` when no response was received.
    pub status_code: i32,
    /// Set when no response was received.
    pub transport_error: Option<TransportError>,
}

impl ProbeOutcome {
    /// An HTTP response with the given status was received.
    pub fn response(status_code: u16) -> Self {
        Self {
            status_code: i32::from(status_code),
            transport_error: None,
        }
    }

    /// No response was received.
    pub fn transport(error: TransportError) -> Self {
        Self {
            status_code: TRANSPORT_FAILURE_STATUS,
            transport_error: Some(error),
        }
    }

    pub fn is_transport_error(&self) -> bool {
        self.transport_error.is_some()
    }

    /// True only for an exact `200` response.
    pub fn is_healthy(&self) -> bool {
        !self.is_transport_error() && self.status_code == HEALTHY_STATUS
    }

    /// Human-readable failure cause; empty for a healthy outcome.
    ///
    /// Transport failures yield their message, non-200 responses their status code.
    pub fn error_detail(&self) -> String {
        match &self.transport_error {
            Some(e) => e.to_string(),
            None if self.status_code == HEALTHY_STATUS => String::new(),
            None => self.status_code.to_string(),
        }
    }
}
