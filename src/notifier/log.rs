//! Log-only notifier.

use async_trait::async_trait;

use crate::notifier::{Message, Notifier, NotifyError};

/// Writes every alert to the log instead of delivering it.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    destination: String,
}

impl LogNotifier {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        tracing::warn!(
            destination = %self.destination,
            subject = %message.subject,
            body = %message.body,
            "Alert"
        );
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "log"
    }
}
