//! Pass driver: one sweep over every candidate endpoint.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use futures_util::stream::{self, StreamExt};
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::MonitorConfig;
use crate::ledger::{self, Ledger, StoreError};
use crate::notifier::{self, Notifier, NotifyError};
use crate::observability::metrics;
use crate::pass::report::PassReport;
use crate::probe::{HttpProber, Prober};
use crate::reconcile::Reconciler;

/// Pass-scoped failures. Endpoint-scoped failures live in the report instead.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Candidates could not be enumerated; nothing was reconciled.
    #[error("failed to scan ledger: {0}")]
    Scan(#[source] StoreError),

    #[error("failed to build probe client: {0}")]
    ProbeClient(#[from] reqwest::Error),

    #[error(transparent)]
    Notifier(#[from] NotifyError),
}

/// Runs monitoring passes against injected collaborators.
#[derive(Clone)]
pub struct Monitor {
    ledger: Arc<dyn Ledger>,
    reconciler: Reconciler,
    max_concurrency: usize,
}

impl Monitor {
    pub fn new(
        prober: Arc<dyn Prober>,
        ledger: Arc<dyn Ledger>,
        notifier: Arc<dyn Notifier>,
        probe_timeout: Duration,
        max_concurrency: usize,
    ) -> Self {
        Self {
            reconciler: Reconciler::new(prober, ledger.clone(), notifier, probe_timeout),
            ledger,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Wire up the HTTP prober, ledger and notifier named by `config`.
    pub fn from_config(config: &MonitorConfig) -> Result<Self, MonitorError> {
        Self::from_config_with_ledger(config, ledger::from_config(&config.ledger))
    }

    /// Like [`Monitor::from_config`], keeping an already opened ledger.
    pub fn from_config_with_ledger(
        config: &MonitorConfig,
        ledger: Arc<dyn Ledger>,
    ) -> Result<Self, MonitorError> {
        let prober = HttpProber::new(&config.probe.user_agent)?;
        let notifier = notifier::from_config(&config.notifier)?;

        Ok(Self::new(
            Arc::new(prober),
            ledger,
            notifier,
            Duration::from_secs(config.probe.timeout_secs),
            config.pass.max_concurrency,
        ))
    }

    pub fn ledger(&self) -> &Arc<dyn Ledger> {
        &self.ledger
    }

    /// Scan, reconcile every candidate, aggregate the report.
    ///
    /// Fails only when the scan fails; every other error is attached to the report.
    pub async fn run_pass(&self) -> Result<PassReport, MonitorError> {
        let pass_id = Uuid::new_v4();
        let span = tracing::info_span!("pass", %pass_id);
        self.execute(pass_id).instrument(span).await
    }

    async fn execute(&self, pass_id: Uuid) -> Result<PassReport, MonitorError> {
        let start = Instant::now();
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        tracing::info!("Scanning ledger for monitored endpoints");
        let records = match self.ledger.scan_candidates().await {
            Ok(records) => records,
            Err(e) => {
                metrics::record_store_failure("scan");
                metrics::record_pass("failed", start.elapsed(), 0);
                tracing::error!(error = %e, "Ledger scan failed, aborting pass");
                return Err(MonitorError::Scan(e));
            }
        };
        let candidates = records.len();

        let endpoints = stream::iter(records)
            .map(|record| self.reconciler.reconcile(record))
            .buffered(self.max_concurrency)
            .collect::<Vec<_>>()
            .await;

        let elapsed = start.elapsed();
        let report = PassReport::new(pass_id, started_at, elapsed.as_millis() as u64, endpoints);

        for error in &report.errors {
            tracing::warn!(url = %error.url, error = %error.error, "Endpoint error");
        }
        tracing::info!(
            endpoints = candidates,
            opened = report.opened,
            closed = report.closed,
            unchanged = report.unchanged,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "Pass complete"
        );
        metrics::record_pass("ok", elapsed, candidates);

        Ok(report)
    }
}
