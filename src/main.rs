//! Uptime monitor (v1)
//!
//! Checks every endpoint registered in the ledger, records incident state
//! transitions and sends one alert per transition.
//!
//! # Architecture Overview
//!
//! ```text
//!   trigger (once | watch | serve | callback)
//!        │
//!        ▼
//!   ┌──────────┐  scan   ┌──────────┐
//!   │  pass    │────────▶│  ledger  │◀──────────────┐
//!   │  driver  │         └──────────┘               │ set_incident
//!   └────┬─────┘                                    │ (transitions only)
//!        │ per endpoint, bounded concurrency        │
//!        ▼                                          │
//!   ┌──────────┐  probe  ┌──────────┐        ┌─────┴──────┐
//!   │reconciler│────────▶│  prober  │        │  commit    │──▶ notifier
//!   │  (state  │◀────────│ (reqwest)│        │ persist,   │
//!   │ machine) │ outcome └──────────┘        │ then alert │
//!   └────┬─────┘────────────────────────────▶└────────────┘
//!        ▼
//!   PassReport: "{status}\t{url}" lines + counts + endpoint errors
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use uptime_monitor::config::{load_config, watcher::ConfigWatcher, MonitorConfig};
use uptime_monitor::lifecycle::{signals, Scheduler, Shutdown};
use uptime_monitor::observability::{logging, metrics};
use uptime_monitor::probe::{HttpProber, Prober};
use uptime_monitor::trigger::TriggerServer;
use uptime_monitor::Monitor;

#[derive(Parser)]
#[command(name = "uptime-monitor", version)]
#[command(about = "Probe endpoints and alert on incident transitions", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single pass and print the report table
    Once,
    /// Run a pass every `pass.interval_secs` until interrupted
    Watch,
    /// Run passes on `POST /pass`
    Serve,
    /// Probe one URL without touching the ledger or notifier
    Check {
        url: String,

        /// Override `probe.timeout_secs` (must be greater than 0)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MonitorConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!(
        ledger = ?config.ledger.backend,
        notifier = ?config.notifier.channel,
        probe_timeout_secs = config.probe.timeout_secs,
        max_concurrency = config.pass.max_concurrency,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    match cli.command {
        Commands::Once => {
            let monitor = Monitor::from_config(&config)?;
            let report = monitor.run_pass().await?;
            print!("{}", report);
        }
        Commands::Watch => {
            let monitor = Monitor::from_config(&config)?;
            let shutdown = Shutdown::new();
            tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

            // The watcher handle must outlive the scheduler.
            let (_watcher, updates) = match &cli.config {
                Some(path) => {
                    let (watcher, updates) = ConfigWatcher::new(path);
                    (Some(watcher.run()?), updates)
                }
                None => {
                    let (_, updates) = mpsc::unbounded_channel();
                    (None, updates)
                }
            };

            let completed = Scheduler::new(monitor, config)
                .run(updates, shutdown.subscribe())
                .await;
            tracing::info!(passes = completed, "Scheduler stopped");
        }
        Commands::Serve => {
            let monitor = Arc::new(Monitor::from_config(&config)?);
            let shutdown = Shutdown::new();
            tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

            let listener = TcpListener::bind(&config.trigger.bind_address).await?;
            TriggerServer::new(monitor, &config.trigger)
                .run(listener, shutdown.subscribe())
                .await?;
        }
        Commands::Check { url, timeout_secs } => {
            let timeout = Duration::from_secs(timeout_secs.unwrap_or(config.probe.timeout_secs));
            let outcome = HttpProber::new(&config.probe.user_agent)?
                .probe(&url, timeout)
                .await;

            println!("{}\t{}", outcome.status_code, url);
            let detail = outcome.error_detail();
            if !detail.is_empty() {
                eprintln!("{}", detail);
            }
        }
    }

    Ok(())
}
