//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, concurrency >= 1)
//! - Check channel-specific requirements (webhook needs a URL)
//! - Validate addresses parse before anything binds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::{LedgerBackend, MonitorConfig, NotifierChannel};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::new("probe.timeout_secs", "must be greater than 0"));
    }

    if config.pass.max_concurrency == 0 {
        errors.push(ValidationError::new("pass.max_concurrency", "must be at least 1"));
    }
    if config.pass.interval_secs == 0 {
        errors.push(ValidationError::new("pass.interval_secs", "must be greater than 0"));
    }

    if config.ledger.backend == LedgerBackend::File && config.ledger.path.trim().is_empty() {
        errors.push(ValidationError::new("ledger.path", "required for the file backend"));
    }

    let notifier = &config.notifier;
    if notifier.destination.trim().is_empty() {
        errors.push(ValidationError::new("notifier.destination", "must not be empty"));
    }
    if notifier.timeout_secs == 0 {
        errors.push(ValidationError::new("notifier.timeout_secs", "must be greater than 0"));
    }
    if notifier.base_delay_ms > notifier.max_delay_ms {
        errors.push(ValidationError::new(
            "notifier.base_delay_ms",
            "must not exceed notifier.max_delay_ms",
        ));
    }
    if notifier.channel == NotifierChannel::Webhook {
        match notifier.webhook_url.as_deref() {
            None => errors.push(ValidationError::new(
                "notifier.webhook_url",
                "required for the webhook channel",
            )),
            Some(raw) => match Url::parse(raw) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(ValidationError::new(
                    "notifier.webhook_url",
                    format!("unsupported scheme '{}'", url.scheme()),
                )),
                Err(e) => errors.push(ValidationError::new(
                    "notifier.webhook_url",
                    format!("invalid URL: {}", e),
                )),
            },
        }
    }

    if config.trigger.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "trigger.bind_address",
            format!("'{}' is not a socket address", config.trigger.bind_address),
        ));
    }
    if config.trigger.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "trigger.request_timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MonitorConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = MonitorConfig::default();
        config.probe.timeout_secs = 0;
        config.pass.max_concurrency = 0;
        config.trigger.bind_address = "nowhere".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["probe.timeout_secs", "pass.max_concurrency", "trigger.bind_address"]
        );
    }

    #[test]
    fn test_webhook_requires_http_url() {
        let mut config = MonitorConfig::default();
        config.notifier.channel = NotifierChannel::Webhook;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "notifier.webhook_url");

        config.notifier.webhook_url = Some("ftp://hooks.example.com".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].message.contains("ftp"));

        config.notifier.webhook_url = Some("https://hooks.example.com/x".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
