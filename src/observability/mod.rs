//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! probe, gate, navigation produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//! ```

pub mod logging;
pub mod metrics;
