//! JSON file ledger.
//!
//! The file is a single JSON object keyed by URL:
//!
//! ```json
//! {
//!   "https://a.test": { "incident_active": false },
//!   "https://b.test": { "incident_active": true, "owner": "payments" }
//! }
//! ```
//!
//! Unknown per-entry fields are preserved across writes. Keys that are not
//! monitored candidates stay in the file untouched, whatever their value.

use std::path::PathBuf;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;

use crate::ledger::record::{is_candidate_key, EndpointRecord};
use crate::ledger::{Ledger, StoreError};

/// The fields of a candidate entry the monitor reads.
#[derive(Debug, Default, Deserialize)]
struct StoredEntry {
    #[serde(default)]
    incident_active: bool,
}

type Document = Map<String, Value>;

fn parse_entry(url: &str, value: &Value) -> Result<StoredEntry, StoreError> {
    if !value.is_object() {
        return Err(StoreError::InvalidRecord(url.to_string()));
    }
    Ok(StoredEntry::deserialize(value)?)
}

/// Ledger persisted as a JSON document on disk.
///
/// Every scan re-reads the file so external edits are picked up between passes.
#[derive(Debug)]
pub struct FileLedger {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileLedger {
    /// Open a ledger at `path`. The file is not touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Write a fresh document holding exactly `records`.
    pub async fn create(
        path: impl Into<PathBuf>,
        records: impl IntoIterator<Item = EndpointRecord>,
    ) -> Result<Self, StoreError> {
        let ledger = Self::new(path);
        let document: Document = records
            .into_iter()
            .map(|r| (r.url, json!({ "incident_active": r.incident_active })))
            .collect();
        ledger.write_document(&document).await?;
        Ok(ledger)
    }

    async fn read_document(&self) -> Result<Document, StoreError> {
        let content = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&content)?)
    }

    async fn write_document(&self, document: &Document) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Ledger for FileLedger {
    async fn scan_candidates(&self) -> Result<Vec<EndpointRecord>, StoreError> {
        let document = self.read_document().await?;
        let total = document.len();
        let mut records = Vec::with_capacity(total);
        for (key, value) in &document {
            if !is_candidate_key(key) {
                continue;
            }
            let entry = parse_entry(key, value)?;
            records.push(EndpointRecord::new(key.clone(), entry.incident_active));
        }
        records.sort_by(|a, b| a.url.cmp(&b.url));

        if records.len() < total {
            tracing::debug!(
                path = ?self.path,
                skipped = total - records.len(),
                "Skipped non-URL ledger keys"
            );
        }
        Ok(records)
    }

    async fn get(&self, url: &str) -> Result<Option<EndpointRecord>, StoreError> {
        let document = self.read_document().await?;
        match document.get(url) {
            Some(value) => {
                let entry = parse_entry(url, value)?;
                Ok(Some(EndpointRecord::new(url, entry.incident_active)))
            }
            None => Ok(None),
        }
    }

    async fn set_incident(&self, url: &str, active: bool) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        let value = document
            .get_mut(url)
            .ok_or_else(|| StoreError::NotFound(url.to_string()))?;

        if parse_entry(url, value)?.incident_active == active {
            return Ok(false);
        }
        if let Some(fields) = value.as_object_mut() {
            fields.insert("incident_active".to_string(), Value::Bool(active));
        }
        self.write_document(&document).await?;
        Ok(true)
    }
}
