//! Pass report aggregation.

use std::fmt;
use serde::Serialize;
use uuid::Uuid;

use crate::reconcile::{EndpointError, EndpointReport, Transition};

/// Endpoint-scoped error surfaced in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedError {
    pub url: String,
    pub error: EndpointError,
}

/// Summary of one pass over all candidates.
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub pass_id: Uuid,
    /// Unix timestamp (seconds) when the pass started.
    pub started_at: u64,
    pub duration_ms: u64,
    /// One entry per candidate, in scan order.
    pub endpoints: Vec<EndpointReport>,
    /// Committed healthy → incident transitions.
    pub opened: usize,
    /// Committed incident → healthy transitions.
    pub closed: usize,
    /// Endpoints whose state did not need to change, or was already changed
    /// by an overlapping pass.
    pub unchanged: usize,
    /// Endpoints whose transition could not be persisted.
    pub failed: usize,
    pub errors: Vec<ReportedError>,
}

impl PassReport {
    /// Aggregate per-endpoint results, keeping their order.
    pub fn new(pass_id: Uuid, started_at: u64, duration_ms: u64, endpoints: Vec<EndpointReport>) -> Self {
        let mut report = Self {
            pass_id,
            started_at,
            duration_ms,
            endpoints: Vec::with_capacity(endpoints.len()),
            opened: 0,
            closed: 0,
            unchanged: 0,
            failed: 0,
            errors: Vec::new(),
        };

        for endpoint in endpoints {
            match (endpoint.transition, endpoint.committed, &endpoint.error) {
                (Transition::None, _, _) => report.unchanged += 1,
                (Transition::Open, true, _) => report.opened += 1,
                (Transition::Close, true, _) => report.closed += 1,
                (_, false, Some(_)) => report.failed += 1,
                // An overlapping pass committed this transition first.
                (_, false, None) => report.unchanged += 1,
            }
            if let Some(error) = &endpoint.error {
                report.errors.push(ReportedError {
                    url: endpoint.url.clone(),
                    error: error.clone(),
                });
            }
            report.endpoints.push(endpoint);
        }

        report
    }

    /// `{status_code}\t{url}` lines in scan order.
    pub fn lines(&self) -> Vec<String> {
        self.endpoints.iter().map(EndpointReport::line).collect()
    }

    /// Lines joined with a trailing newline after each.
    pub fn to_table(&self) -> String {
        self.endpoints
            .iter()
            .map(|e| format!("{}\n", e.line()))
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table())
    }
}
