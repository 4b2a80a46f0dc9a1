//! Boot-time readiness gate.
//!
//! Probes target URLs with `HEAD` requests, backs off additively while they
//! are unreachable, and hands each one to a [`navigation::Navigator`] once
//! it answers with a success status.

pub mod config;
pub mod error;
pub mod gate;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod probe;
pub mod resilience;

pub use config::GateConfig;
pub use gate::{spawn_all, BootstrapGate, GateHandle, GateOutcome};
pub use lifecycle::Shutdown;
pub use probe::{HttpProber, ProbeOutcome, Prober};
pub use resilience::BackoffPolicy;
