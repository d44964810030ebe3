//! HTTP prober backed by reqwest.

use std::error::Error as _;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use reqwest::Client;

use crate::observability::metrics;
use crate::probe::outcome::{ProbeOutcome, TransportError};
use crate::probe::Prober;

/// Issues a single GET per probe; no retries.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// Create a prober sending the given User-Agent.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeOutcome {
        let start = Instant::now();
        let result = self.client.get(url).timeout(timeout).send().await;

        let outcome = match result {
            Ok(response) => {
                let status = response.status();
                if status != reqwest::StatusCode::OK {
                    tracing::debug!(url = %url, status = %status, "Probe got non-200 status");
                }
                ProbeOutcome::response(status.as_u16())
            }
            Err(e) => {
                let error = classify_error(&e);
                tracing::debug!(url = %url, error = %e, class = ?error, "Probe transport failure");
                ProbeOutcome::transport(error)
            }
        };

        metrics::record_probe(probe_class(&outcome), start.elapsed());
        outcome
    }
}

/// Map a reqwest failure onto the transport taxonomy.
pub fn classify_error(e: &reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::ConnectionRefused
    } else {
        TransportError::Other(error_chain(e))
    }
}

fn error_chain(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn probe_class(outcome: &ProbeOutcome) -> &'static str {
    match &outcome.transport_error {
        Some(TransportError::Timeout) => "timeout",
        Some(TransportError::ConnectionRefused) => "connection_refused",
        Some(TransportError::Other(_)) => "transport_other",
        None if outcome.is_healthy() => "ok",
        None => "bad_status",
    }
}
