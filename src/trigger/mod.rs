//! Trigger surfaces that start a pass.
//!
//! # Data Flow
//! ```text
//! CLI `once`             → Monitor::run_pass() → table on stdout
//! CLI `watch`            → lifecycle::scheduler (interval loop)
//! HTTP `POST /pass`      → server.rs → JSON report
//! scheduler callback     → event.rs handle_event(event, context)
//! ```
//!
//! # Design Decisions
//! - Triggers never inspect their payloads
//! - A pass-fatal error surfaces as a failed run (exit code, HTTP 500, Err)

pub mod event;
pub mod server;

pub use event::handle_event;
pub use server::TriggerServer;
