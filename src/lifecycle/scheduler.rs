//! Scheduled pass loop for `watch` mode.

use std::sync::Arc;
use std::time::Duration;
use arc_swap::ArcSwap;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::MonitorConfig;
use crate::pass::Monitor;

/// Runs a pass every interval until shutdown, applying config reloads between passes.
pub struct Scheduler {
    monitor: ArcSwap<Monitor>,
    config: MonitorConfig,
    interval: Duration,
}

impl Scheduler {
    pub fn new(monitor: Monitor, config: MonitorConfig) -> Self {
        let interval = Duration::from_secs(config.pass.interval_secs);
        Self {
            monitor: ArcSwap::from_pointee(monitor),
            config,
            interval,
        }
    }

    /// Monitor used for the next pass.
    pub fn current(&self) -> Arc<Monitor> {
        self.monitor.load_full()
    }

    /// Swap in a monitor built from `config`. Keeps the old one on failure.
    ///
    /// The ledger is reused unless its configuration changed, so an in-memory
    /// ledger survives unrelated reloads.
    pub fn apply_config(&mut self, config: MonitorConfig) -> bool {
        let rebuilt = if config.ledger == self.config.ledger {
            Monitor::from_config_with_ledger(&config, self.current().ledger().clone())
        } else {
            Monitor::from_config(&config)
        };

        match rebuilt {
            Ok(monitor) => {
                self.monitor.store(Arc::new(monitor));
                self.interval = Duration::from_secs(config.pass.interval_secs);
                self.config = config;
                tracing::info!(interval_secs = self.interval.as_secs(), "Applied reloaded configuration");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Reloaded configuration rejected, keeping current monitor");
                false
            }
        }
    }

    /// Run until shutdown. Returns the number of passes that completed.
    ///
    /// A pass still in flight at shutdown is abandoned; commits already
    /// started finish on their own tasks.
    pub async fn run(
        mut self,
        mut config_updates: mpsc::UnboundedReceiver<MonitorConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> usize {
        tracing::info!(interval_secs = self.interval.as_secs(), "Scheduler starting");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut completed = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let monitor = self.current();
                    tokio::select! {
                        result = monitor.run_pass() => {
                            completed += 1;
                            match result {
                                Ok(report) => tracing::debug!(report = %report, "Pass report"),
                                Err(e) => tracing::error!(error = %e, "Pass failed"),
                            }
                        }
                        _ = shutdown.recv() => {
                            tracing::info!("Shutdown during pass, abandoning in-flight probes");
                            break;
                        }
                    }
                }
                Some(config) = config_updates.recv() => {
                    let previous = self.interval;
                    if self.apply_config(config) && self.interval != previous {
                        ticker = time::interval_at(Instant::now() + self.interval, self.interval);
                        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Scheduler received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        completed
    }
}
