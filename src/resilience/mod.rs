//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Failed probe:
//!     → backoff.rs (previous interval → next interval)
//!     → gate waits, then probes again
//! ```
//!
//! # Design Decisions
//! - No jitter: retry timing must match the configured constants exactly
//! - No attempt limit: only the ceiling bounds resource usage

pub mod backoff;

pub use backoff::{
    BackoffPolicy, INTERVAL_INCREASE_MS, MAX_INTERVAL_MS, START_INTERVAL_MS,
};
