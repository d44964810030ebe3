//! Webhook notifier against a live receiver.

use std::sync::Arc;
use std::time::Duration;
use uptime_monitor::ledger::{EndpointRecord, MemoryLedger};
use uptime_monitor::notifier::{Message, Notifier, NotifyError, WebhookNotifier};
use uptime_monitor::probe::HttpProber;
use uptime_monitor::reconcile::EndpointError;
use uptime_monitor::resilience::RetryPolicy;
use uptime_monitor::Monitor;

mod common;

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
    }
}

fn notifier(url: String, retry: RetryPolicy) -> WebhookNotifier {
    WebhookNotifier::new(url, "no-reply@example.com", "ops@example.com", Duration::from_secs(2), retry).unwrap()
}

#[tokio::test]
async fn test_delivers_payload() {
    let (url, sink) = common::start_webhook_sink(vec![]).await;

    notifier(url, RetryPolicy::NONE)
        .send(&Message::incident_cleared("https://b.test"))
        .await
        .unwrap();

    let received = sink.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["source"], "no-reply@example.com");
    assert_eq!(received[0]["destination"], "ops@example.com");
    assert_eq!(received[0]["subject"], "Monitoring Alert Clear - https://b.test");
    assert_eq!(received[0]["body"], "https://b.test\nIncident Clear");
}

#[tokio::test]
async fn test_retries_server_errors() {
    let (url, sink) = common::start_webhook_sink(vec![503, 502]).await;

    notifier(url, fast_retry(2))
        .send(&Message::incident_cleared("https://b.test"))
        .await
        .unwrap();

    assert_eq!(sink.hits(), 3);
    assert_eq!(sink.received().len(), 1);
}

#[tokio::test]
async fn test_gives_up_after_retries() {
    let (url, sink) = common::start_webhook_sink(vec![500, 500, 500, 500]).await;

    let err = notifier(url, fast_retry(1))
        .send(&Message::incident_cleared("https://b.test"))
        .await
        .unwrap_err();

    assert!(matches!(err, NotifyError::Rejected { status: 500 }));
    assert_eq!(sink.hits(), 2);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let (url, sink) = common::start_webhook_sink(vec![400]).await;

    let err = notifier(url, fast_retry(3))
        .send(&Message::incident_cleared("https://b.test"))
        .await
        .unwrap_err();

    assert!(matches!(err, NotifyError::Rejected { status: 400 }));
    assert_eq!(sink.hits(), 1);
}

#[tokio::test]
async fn test_failed_delivery_keeps_incident_recorded() {
    let (url, sink) = common::start_webhook_sink(vec![500, 500]).await;
    let backend = common::start_fixed_backend(500).await;
    let endpoint = format!("http://{}/", backend);

    let ledger = Arc::new(MemoryLedger::from_records([EndpointRecord::healthy(endpoint.clone())]));
    let monitor = Monitor::new(
        Arc::new(HttpProber::new("uptime-monitor-it").unwrap()),
        ledger.clone(),
        Arc::new(notifier(url, fast_retry(1))),
        common::PROBE_TIMEOUT,
        1,
    );

    let first = monitor.run_pass().await.unwrap();
    assert_eq!(first.opened, 1);
    assert!(matches!(first.errors[0].error, EndpointError::Notify(_)));

    // The incident stands, so the next pass neither re-opens nor re-alerts.
    let second = monitor.run_pass().await.unwrap();
    assert_eq!(second.unchanged, 1);
    assert!(second.errors.is_empty());
    assert_eq!(sink.hits(), 2);
}
