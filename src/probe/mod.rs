//! Endpoint probing.
//!
//! # Data Flow
//! ```text
//! Reconciler
//!     → Prober::probe(url, timeout)
//!     → single GET, bounded by timeout
//!     → ProbeOutcome (status code or transport error)
//! ```
//!
//! # Design Decisions
//! - One attempt per pass; retry policy does not live here
//! - Transport failures are outcomes, never errors: a probe cannot fail a pass
//! - Only an exact 200 counts as healthy

pub mod http;
pub mod outcome;

use std::time::Duration;
use async_trait::async_trait;

pub use http::HttpProber;
pub use outcome::{ProbeOutcome, TransportError, TRANSPORT_FAILURE_STATUS};

/// Default per-probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Checks one endpoint and classifies the result.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe `url` once, giving up after `timeout`.
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeOutcome;
}
