//! Callback entry point for external schedulers.

use crate::pass::{Monitor, MonitorError, PassReport};

/// Run one pass on behalf of an event source.
///
/// `event` and `context` are accepted so any scheduler payload can be passed
/// through unchanged; their contents do not influence the pass.
pub async fn handle_event<E, C>(
    monitor: &Monitor,
    _event: E,
    _context: C,
) -> Result<PassReport, MonitorError> {
    tracing::info!("Pass triggered by external event");
    monitor.run_pass().await
}
