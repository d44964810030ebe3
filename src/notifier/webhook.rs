//! Webhook notifier.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::NotifierConfig;
use crate::notifier::{Message, Notifier, NotifyError};
use crate::resilience::RetryPolicy;

/// JSON body POSTed for every alert.
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub source: &'a str,
    pub destination: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
}

/// Delivers alerts as JSON POSTs to a fixed URL.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
    source: String,
    destination: String,
    retry: RetryPolicy,
}

impl WebhookNotifier {
    /// Create a webhook notifier.
    pub fn new(
        url: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NotifyError::Build)?;

        Ok(Self {
            client,
            url: url.into(),
            source: source.into(),
            destination: destination.into(),
            retry,
        })
    }

    /// Create from notifier configuration; `webhook_url` must be set.
    pub fn from_config(config: &NotifierConfig) -> Result<Self, NotifyError> {
        let url = config
            .webhook_url
            .clone()
            .ok_or_else(|| NotifyError::Misconfigured("webhook_url is not set".to_string()))?;

        Self::new(
            url,
            config.source.clone(),
            config.destination.clone(),
            Duration::from_secs(config.timeout_secs),
            RetryPolicy::from_config(config),
        )
    }

    async fn attempt(&self, payload: &WebhookPayload<'_>) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| NotifyError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            source: &self.source,
            destination: &self.destination,
            subject: &message.subject,
            body: &message.body,
        };

        let max_attempts = self.retry.max_attempts();
        let mut attempt = 1;
        loop {
            match self.attempt(&payload).await {
                Ok(()) => {
                    tracing::debug!(subject = %message.subject, attempt, "Webhook delivered");
                    return Ok(());
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Webhook delivery failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn channel(&self) -> &'static str {
        "webhook"
    }
}
