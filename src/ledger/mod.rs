//! Incident ledger subsystem.
//!
//! # Data Flow
//! ```text
//! Pass driver
//!     → Ledger::scan_candidates() (keys beginning with "http", sorted by URL)
//!     → Reconciler reads incident_active from each record
//!     → Ledger::set_incident(url, flag) only on a detected transition
//!     → Ok(true): this caller flipped the flag and owns the alert
//!     → Ok(false): the flag already held that value (concurrent pass won)
//! ```
//!
//! # Design Decisions
//! - The ledger is a capability behind a trait; backends are swappable
//! - set_incident never creates a record, it only overwrites an existing flag
//! - set_incident is a per-key compare-and-set; writing the same value twice
//!   changes nothing and reports false
//! - Records are never deleted from here

pub mod file;
pub mod memory;
pub mod record;

use std::sync::Arc;
use async_trait::async_trait;
use thiserror::Error;

use crate::config::{LedgerBackend, LedgerConfig};

pub use file::FileLedger;
pub use memory::MemoryLedger;
pub use record::{is_candidate_key, EndpointRecord};

/// Errors raised by a ledger backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger document is invalid: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no ledger record for '{0}'")]
    NotFound(String),

    #[error("ledger record for '{0}' is not an object")]
    InvalidRecord(String),

    #[error("ledger backend error: {0}")]
    Backend(String),
}

/// Durable per-endpoint incident state.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// All monitored records, in a stable order.
    async fn scan_candidates(&self) -> Result<Vec<EndpointRecord>, StoreError>;

    /// Read one record by URL.
    async fn get(&self, url: &str) -> Result<Option<EndpointRecord>, StoreError>;

    /// Set the incident flag of an existing record if it differs from `active`.
    ///
    /// Returns `true` only when this call changed the stored flag. The check
    /// and the write are atomic per key, so of several overlapping callers
    /// exactly one observes the change.
    async fn set_incident(&self, url: &str, active: bool) -> Result<bool, StoreError>;
}

/// Build the ledger selected by configuration.
pub fn from_config(config: &LedgerConfig) -> Arc<dyn Ledger> {
    match config.backend {
        LedgerBackend::File => Arc::new(FileLedger::new(&config.path)),
        LedgerBackend::Memory => Arc::new(MemoryLedger::new()),
    }
}
