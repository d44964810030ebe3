//! Monitoring passes.
//!
//! # Data Flow
//! ```text
//! Trigger (once / watch / HTTP / callback)
//!     → Monitor::run_pass()
//!     → Ledger::scan_candidates()         (failure aborts the pass)
//!     → Reconciler per record, bounded concurrency, scan order kept
//!     → PassReport (lines, counts, endpoint errors)
//! ```
//!
//! # Design Decisions
//! - Only the scan is pass-fatal; endpoint errors are isolated and reported
//! - Concurrency is bounded by `pass.max_concurrency`
//! - Report lines follow scan order regardless of completion order

pub mod driver;
pub mod report;

pub use driver::{Monitor, MonitorError};
pub use report::{PassReport, ReportedError};
