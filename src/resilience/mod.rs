//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Alert delivery:
//!     → first attempt
//!     → on transport failure or 5xx: backoff.rs delay, retry
//!     → after max_retries: give up, report NotifyError
//! ```
//!
//! # Design Decisions
//! - Probes are never retried; one attempt per endpoint per pass
//! - Notification retries only on failures that may be transient (never 4xx)
//! - Jittered backoff avoids synchronized retries from overlapping passes

pub mod backoff;

pub use backoff::{calculate_backoff, RetryPolicy};
