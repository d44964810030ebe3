//! Notification subsystem.
//!
//! # Data Flow
//! ```text
//! Reconciler (after the ledger write succeeded)
//!     → message.rs (subject + body for OPEN / CLOSE)
//!     → Notifier::send()
//!         log.rs     → structured log event
//!         webhook.rs → JSON POST with retry/backoff
//! ```
//!
//! # Design Decisions
//! - Destination is fixed configuration, never per call
//! - Delivery failures are reported, never rolled back into the ledger
//! - One channel per monitor

pub mod log;
pub mod message;
pub mod webhook;

use std::sync::Arc;
use async_trait::async_trait;
use thiserror::Error;

use crate::config::{NotifierChannel, NotifierConfig};

pub use log::LogNotifier;
pub use message::Message;
pub use webhook::WebhookNotifier;

/// Errors raised while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The request never got a response.
    #[error("delivery failed: {0}")]
    Http(String),

    /// The channel answered with a non-success status.
    #[error("delivery rejected with status {status}")]
    Rejected { status: u16 },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("notifier misconfigured: {0}")]
    Misconfigured(String),
}

impl NotifyError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            NotifyError::Http(_) => true,
            NotifyError::Rejected { status } => *status >= 500,
            NotifyError::Build(_) | NotifyError::Misconfigured(_) => false,
        }
    }
}

/// Sends one-shot alerts to a fixed destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &Message) -> Result<(), NotifyError>;

    /// Short channel name for logs and metrics.
    fn channel(&self) -> &'static str;
}

/// Build the notifier selected by configuration.
pub fn from_config(config: &NotifierConfig) -> Result<Arc<dyn Notifier>, NotifyError> {
    Ok(match config.channel {
        NotifierChannel::Log => Arc::new(LogNotifier::new(config.destination.clone())),
        NotifierChannel::Webhook => Arc::new(WebhookNotifier::from_config(config)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(NotifyError::Http("reset".into()).is_retryable());
        assert!(NotifyError::Rejected { status: 502 }.is_retryable());
        assert!(!NotifyError::Rejected { status: 400 }.is_retryable());
        assert!(!NotifyError::Misconfigured("x".into()).is_retryable());
    }

    #[test]
    fn test_default_channel_is_log() {
        let notifier = from_config(&NotifierConfig::default()).unwrap();
        assert_eq!(notifier.channel(), "log");
    }
}
