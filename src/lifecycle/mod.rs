//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Scheduler (scheduler.rs):
//!     Interval tick → Monitor::run_pass() → log report
//!     Config update → rebuild Monitor → swap before next tick
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → scheduler / trigger server exit
//!
//! Signals (signals.rs):
//!     SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Config changes apply between passes, never during one
//! - Shutdown abandons the in-flight pass instead of waiting for it
//! - Passes never overlap within one scheduler

pub mod scheduler;
pub mod shutdown;
pub mod signals;

pub use scheduler::Scheduler;
pub use shutdown::Shutdown;
