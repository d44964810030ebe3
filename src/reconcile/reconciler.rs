//! Per-endpoint reconciliation.

use std::sync::Arc;
use std::time::Duration;
use serde::Serialize;
use thiserror::Error;

use crate::ledger::{EndpointRecord, Ledger};
use crate::notifier::{Message, Notifier};
use crate::observability::metrics;
use crate::probe::{ProbeOutcome, Prober};
use crate::reconcile::state::{IncidentState, Transition};

/// Endpoint-scoped failure recorded in the pass report.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum EndpointError {
    /// The ledger write failed; the transition was not committed and nothing was sent.
    #[error("store: {0}")]
    Store(String),
    /// The transition was committed but the alert could not be delivered.
    #[error("notify: {0}")]
    Notify(String),
}

/// What happened to one endpoint during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointReport {
    pub url: String,
    pub outcome: ProbeOutcome,
    /// State read from the ledger before probing.
    pub previous: IncidentState,
    /// Transition the outcome called for.
    pub transition: Transition,
    /// Whether this reconcile flipped the ledger flag. False for `None`, for a
    /// failed write, and when an overlapping pass already applied the transition.
    pub committed: bool,
    pub error: Option<EndpointError>,
}

impl EndpointReport {
    pub fn status_code(&self) -> i32 {
        self.outcome.status_code
    }

    /// Report line: `{status_code}\t{url}`.
    pub fn line(&self) -> String {
        format!("{}\t{}", self.outcome.status_code, self.url)
    }
}

/// Applies the incident state machine to one endpoint at a time.
#[derive(Clone)]
pub struct Reconciler {
    prober: Arc<dyn Prober>,
    ledger: Arc<dyn Ledger>,
    notifier: Arc<dyn Notifier>,
    probe_timeout: Duration,
}

impl Reconciler {
    pub fn new(
        prober: Arc<dyn Prober>,
        ledger: Arc<dyn Ledger>,
        notifier: Arc<dyn Notifier>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            prober,
            ledger,
            notifier,
            probe_timeout,
        }
    }

    /// Probe one endpoint and commit any transition.
    ///
    /// Cancelling this future while the probe runs leaves no trace. Once the
    /// probe has completed, the commit runs on its own task and finishes even
    /// if this future is dropped.
    pub async fn reconcile(&self, record: EndpointRecord) -> EndpointReport {
        let previous = IncidentState::from_flag(record.incident_active);
        let outcome = self.prober.probe(&record.url, self.probe_timeout).await;
        let transition = Transition::decide(previous, &outcome);

        tracing::debug!(
            url = %record.url,
            status = outcome.status_code,
            previous = ?previous,
            transition = %transition,
            "Probed endpoint"
        );

        let Some(target) = transition.target() else {
            return EndpointReport {
                url: record.url,
                outcome,
                previous,
                transition,
                committed: false,
                error: None,
            };
        };

        let message = match transition {
            Transition::Close => Message::incident_cleared(&record.url),
            _ => Message::incident_opened(&record.url, &outcome),
        };

        let commit = tokio::spawn(commit(
            self.ledger.clone(),
            self.notifier.clone(),
            record.url.clone(),
            target,
            transition,
            message,
        ));

        let (committed, error) = match commit.await {
            Ok(result) => result,
            Err(e) => (false, Some(EndpointError::Store(format!("commit task failed: {}", e)))),
        };

        EndpointReport {
            url: record.url,
            outcome,
            previous,
            transition,
            committed,
            error,
        }
    }
}

/// Persist the new state, then notify. Returns (committed, error).
async fn commit(
    ledger: Arc<dyn Ledger>,
    notifier: Arc<dyn Notifier>,
    url: String,
    target: IncidentState,
    transition: Transition,
    message: Message,
) -> (bool, Option<EndpointError>) {
    match transition {
        Transition::Close => tracing::info!(url = %url, "Resolving incident in ledger"),
        _ => tracing::info!(url = %url, "Recording incident in ledger"),
    }

    match ledger.set_incident(&url, target.as_flag()).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!(
                url = %url,
                transition = %transition,
                "Transition already recorded by a concurrent pass, skipping notification"
            );
            return (false, None);
        }
        Err(e) => {
            metrics::record_store_failure("set_incident");
            tracing::error!(
                url = %url,
                transition = %transition,
                error = %e,
                "Ledger update failed, skipping notification"
            );
            return (false, Some(EndpointError::Store(e.to_string())));
        }
    }
    metrics::record_transition(transition.as_str());

    tracing::info!(
        url = %url,
        channel = notifier.channel(),
        subject = %message.subject,
        "Pushing notification"
    );
    match notifier.send(&message).await {
        Ok(()) => (true, None),
        Err(e) => {
            metrics::record_notify_failure(notifier.channel());
            tracing::warn!(
                url = %url,
                channel = notifier.channel(),
                error = %e,
                "Notification failed, keeping committed state"
            );
            (true, Some(EndpointError::Notify(e.to_string())))
        }
    }
}
