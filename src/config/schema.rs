//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the uptime monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Probe settings (timeout, user agent).
    pub probe: ProbeConfig,

    /// Pass scheduling and concurrency.
    pub pass: PassConfig,

    /// Incident ledger backend.
    pub ledger: LedgerConfig,

    /// Notification channel.
    pub notifier: NotifierConfig,

    /// HTTP trigger listener.
    pub trigger: TriggerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with every probe.
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("uptime-monitor/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Pass configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PassConfig {
    /// Maximum endpoints reconciled concurrently within one pass.
    pub max_concurrency: usize,

    /// Interval between passes in `watch` mode, in seconds.
    pub interval_secs: u64,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            interval_secs: 300,
        }
    }
}

/// Which ledger implementation backs the monitor.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// JSON document on disk.
    File,
    /// In-process map, lost on exit.
    Memory,
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LedgerConfig {
    pub backend: LedgerBackend,

    /// Path of the JSON ledger file (file backend only).
    pub path: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::File,
            path: "monitoring.json".to_string(),
        }
    }
}

/// Which notification channel delivers alerts.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotifierChannel {
    /// Emit alerts as log events only.
    Log,
    /// POST alerts as JSON to `webhook_url`.
    Webhook,
}

/// Notifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NotifierConfig {
    pub channel: NotifierChannel,

    /// Sender identity stamped on every message.
    pub source: String,

    /// Fixed recipient of every message.
    pub destination: String,

    /// Target URL for the webhook channel.
    pub webhook_url: Option<String>,

    /// Delivery timeout in seconds.
    pub timeout_secs: u64,

    /// Retries after the first failed delivery attempt.
    pub max_retries: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            channel: NotifierChannel::Log,
            source: "no-reply@localhost".to_string(),
            destination: "ops@localhost".to_string(),
            webhook_url: None,
            timeout_secs: 10,
            max_retries: 2,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// HTTP trigger configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TriggerConfig {
    /// Bind address for `serve` mode (e.g., "127.0.0.1:8085").
    pub bind_address: String,

    /// Upper bound on one triggered pass, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8085".to_string(),
            request_timeout_secs: 300,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: MonitorConfig = toml::from_str("").unwrap();
        assert_eq!(config, MonitorConfig::default());
        assert_eq!(config.probe.timeout_secs, 10);
        assert_eq!(config.ledger.backend, LedgerBackend::File);
        assert_eq!(config.notifier.channel, NotifierChannel::Log);
    }

    #[test]
    fn test_partial_sections() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [ledger]
            backend = "memory"

            [notifier]
            channel = "webhook"
            webhook_url = "https://hooks.example.com/alert"
            destination = "oncall@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.ledger.backend, LedgerBackend::Memory);
        assert_eq!(config.ledger.path, "monitoring.json");
        assert_eq!(config.notifier.channel, NotifierChannel::Webhook);
        assert_eq!(config.notifier.destination, "oncall@example.com");
        assert_eq!(config.notifier.max_retries, 2);
    }
}
