//! Reconciliation: the incident state machine and its side effects.
//!
//! # Data Flow
//! ```text
//! EndpointRecord (persisted incident flag)
//!     → Prober::probe()
//!     → state.rs Transition::decide(state, outcome)
//!     → None: report only
//!     → Open/Close: Ledger::set_incident() then Notifier::send()
//!     → EndpointReport
//! ```
//!
//! # Design Decisions
//! - The persisted flag is the only input state; there is no default
//! - Persist before notify: a failed write sends nothing
//! - A failed notification never rolls back the write
//! - The commit runs on its own task so cancellation cannot split it

pub mod reconciler;
pub mod state;

pub use reconciler::{EndpointError, EndpointReport, Reconciler};
pub use state::{IncidentState, Transition};
