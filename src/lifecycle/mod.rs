//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     root token cancelled → every chain's child token cancelled
//!     → chains end in Cancelled without redirecting
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
