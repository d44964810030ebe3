//! Uptime monitor library.
//!
//! Probes registered endpoints over HTTP, keeps a per-endpoint incident flag
//! in a ledger, and alerts exactly once when an endpoint enters an incident
//! and once when it recovers.

// Core
pub mod ledger;
pub mod notifier;
pub mod pass;
pub mod probe;
pub mod reconcile;

// Surfaces and cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod trigger;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::MonitorConfig;
pub use pass::{Monitor, MonitorError, PassReport};
