//! Alert message composition.

use serde::Serialize;

use crate::probe::ProbeOutcome;

/// Subject + body pair handed to a notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

impl Message {
    /// Alert for an endpoint entering an incident.
    pub fn incident_opened(url: &str, outcome: &ProbeOutcome) -> Self {
        Self {
            subject: format!("Monitoring Alert - {}", url),
            body: format!("{}\nReceived the following error:\n{}", url, outcome.error_detail()),
        }
    }

    /// Alert for an endpoint recovering.
    pub fn incident_cleared(url: &str) -> Self {
        Self {
            subject: format!("Monitoring Alert Clear - {}", url),
            body: format!("{}\nIncident Clear", url),
        }
    }
}
