//! In-memory ledger.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::ledger::record::{is_candidate_key, EndpointRecord};
use crate::ledger::{Ledger, StoreError};

/// Ledger held in a concurrent map; state is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    inner: DashMap<String, bool>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger seeded with the given records.
    pub fn from_records(records: impl IntoIterator<Item = EndpointRecord>) -> Self {
        let ledger = Self::new();
        for record in records {
            ledger.insert(record);
        }
        ledger
    }

    /// Register or overwrite a record.
    pub fn insert(&self, record: EndpointRecord) {
        self.inner.insert(record.url, record.incident_active);
    }

    /// Number of stored keys, candidates or not.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn scan_candidates(&self) -> Result<Vec<EndpointRecord>, StoreError> {
        let mut records: Vec<EndpointRecord> = self
            .inner
            .iter()
            .filter(|entry| is_candidate_key(entry.key()))
            .map(|entry| EndpointRecord::new(entry.key().clone(), *entry.value()))
            .collect();
        records.sort_by(|a, b| a.url.cmp(&b.url));
        Ok(records)
    }

    async fn get(&self, url: &str) -> Result<Option<EndpointRecord>, StoreError> {
        Ok(self
            .inner
            .get(url)
            .map(|entry| EndpointRecord::new(url, *entry.value())))
    }

    async fn set_incident(&self, url: &str, active: bool) -> Result<bool, StoreError> {
        match self.inner.get_mut(url) {
            Some(entry) if *entry == active => Ok(false),
            Some(mut entry) => {
                *entry = active;
                Ok(true)
            }
            None => Err(StoreError::NotFound(url.to_string())),
        }
    }
}
