//! Test doubles for the ledger, prober and notifier seams.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use tokio::sync::Notify;

use crate::ledger::{EndpointRecord, Ledger, MemoryLedger, StoreError};
use crate::notifier::{Message, Notifier, NotifyError};
use crate::probe::{ProbeOutcome, Prober, TransportError};

/// Returns queued outcomes per URL; the last one repeats once the queue drains.
#[derive(Default)]
pub struct ScriptedProber {
    scripts: Mutex<HashMap<String, VecDeque<ProbeOutcome>>>,
    latency: Duration,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before answering each probe.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with(self, url: &str, outcomes: impl IntoIterator<Item = ProbeOutcome>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), outcomes.into_iter().collect());
        self
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, url: &str, _timeout: Duration) -> ProbeOutcome {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => ProbeOutcome::transport(TransportError::Other(format!("unscripted url {}", url))),
        }
    }
}

/// Records every message; optionally fails every delivery.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Message>>,
    attempts: AtomicUsize,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Successfully delivered messages.
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotifyError::Rejected { status: 503 });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "recording"
    }
}

/// Memory ledger with injectable failures.
#[derive(Default)]
pub struct FailingLedger {
    inner: MemoryLedger,
    fail_scan: bool,
    /// `None` fails every write.
    fail_writes_for: Option<HashSet<String>>,
    writes: AtomicUsize,
}

impl FailingLedger {
    /// Empty ledger whose writes always fail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger holding `records` whose writes succeed unless configured otherwise.
    pub fn wrapping(records: impl IntoIterator<Item = EndpointRecord>) -> Self {
        Self {
            inner: MemoryLedger::from_records(records),
            fail_writes_for: Some(HashSet::new()),
            ..Self::default()
        }
    }

    pub fn failing_writes_for(mut self, urls: &[&str]) -> Self {
        self.fail_writes_for = Some(urls.iter().map(|u| u.to_string()).collect());
        self
    }

    pub fn failing_scan(mut self) -> Self {
        self.fail_scan = true;
        self
    }

    /// Write attempts, failed or not.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Ledger for FailingLedger {
    async fn scan_candidates(&self) -> Result<Vec<EndpointRecord>, StoreError> {
        if self.fail_scan {
            return Err(StoreError::Backend("scan unavailable".to_string()));
        }
        self.inner.scan_candidates().await
    }

    async fn get(&self, url: &str) -> Result<Option<EndpointRecord>, StoreError> {
        self.inner.get(url).await
    }

    async fn set_incident(&self, url: &str, active: bool) -> Result<bool, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let fails = match &self.fail_writes_for {
            None => true,
            Some(urls) => urls.contains(url),
        };
        if fails {
            return Err(StoreError::Backend(format!("write rejected for {}", url)));
        }
        self.inner.set_incident(url, active).await
    }
}

/// Memory ledger whose writes park until released.
#[derive(Default)]
pub struct GatedLedger {
    inner: MemoryLedger,
    entered: Notify,
    release: Notify,
}

impl GatedLedger {
    pub fn wrapping(records: impl IntoIterator<Item = EndpointRecord>) -> Self {
        Self {
            inner: MemoryLedger::from_records(records),
            ..Self::default()
        }
    }

    /// Resolves once a write is parked at the gate.
    pub async fn write_started(&self) {
        self.entered.notified().await;
    }

    /// Let the parked write through.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl Ledger for GatedLedger {
    async fn scan_candidates(&self) -> Result<Vec<EndpointRecord>, StoreError> {
        self.inner.scan_candidates().await
    }

    async fn get(&self, url: &str) -> Result<Option<EndpointRecord>, StoreError> {
        self.inner.get(url).await
    }

    async fn set_incident(&self, url: &str, active: bool) -> Result<bool, StoreError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.set_incident(url, active).await
    }
}
