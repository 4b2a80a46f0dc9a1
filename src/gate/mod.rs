//! Boot-time readiness gate.
//!
//! # Data Flow
//! ```text
//! GateHandle::spawn / spawn_all
//!     → chain.rs: probe target
//!         reachable   → navigator (once) → Redirected
//!         unreachable → backoff interval → sleep → probe again
//!     → state.rs: snapshot published on every transition
//! ```
//!
//! # Design Decisions
//! - One task per target, each with its own interval state
//! - Retries are unbounded; a cancellation token is the only stop condition
//! - Error status and no response share one retry policy, they differ only in logs

pub mod chain;
pub mod handle;
pub mod state;

pub use chain::{BootstrapGate, GateOutcome};
pub use handle::{spawn_all, GateHandle};
pub use state::{ChainSnapshot, GateState, RetryChain};
