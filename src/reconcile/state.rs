//! Incident state machine.
//!
//! # States
//! - Healthy: `incident_active = false`
//! - Incident: `incident_active = true`
//!
//! # Transitions
//! ```text
//! Healthy  + failure (transport error or status != 200) → Open   → Incident
//! Healthy  + 200                                        → None   → Healthy
//! Incident + failure                                    → None   → Incident
//! Incident + 200                                        → Close  → Healthy
//! ```
//!
//! Alerts fire only on the edges, so a persistently failing endpoint produces
//! one Open per incident and each recovery exactly one Close.

use std::fmt;
use serde::Serialize;

use crate::probe::ProbeOutcome;

/// Persisted incident state of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentState {
    Healthy,
    Incident,
}

impl IncidentState {
    pub fn from_flag(incident_active: bool) -> Self {
        if incident_active {
            IncidentState::Incident
        } else {
            IncidentState::Healthy
        }
    }

    pub fn as_flag(self) -> bool {
        self == IncidentState::Incident
    }
}

/// Change of incident state detected for one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    None,
    /// Healthy → Incident.
    Open,
    /// Incident → Healthy.
    Close,
}

impl Transition {
    /// Apply the transition table to the persisted state and a fresh outcome.
    pub fn decide(state: IncidentState, outcome: &ProbeOutcome) -> Self {
        match (state, outcome.is_healthy()) {
            (IncidentState::Healthy, false) => Transition::Open,
            (IncidentState::Incident, true) => Transition::Close,
            (IncidentState::Healthy, true) | (IncidentState::Incident, false) => Transition::None,
        }
    }

    /// State the ledger must hold after this transition commits.
    pub fn target(self) -> Option<IncidentState> {
        match self {
            Transition::None => None,
            Transition::Open => Some(IncidentState::Incident),
            Transition::Close => Some(IncidentState::Healthy),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Transition::None => "none",
            Transition::Open => "open",
            Transition::Close => "close",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
