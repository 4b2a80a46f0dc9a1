//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides applied by the binary
//!     → validation.rs (semantic checks on the merged result)
//!     → GateConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, read_config};
pub use schema::{
    BackoffConfig, GateConfig, LogFormat, NavigationConfig, NavigationMode,
    ObservabilityConfig, ProbeConfig, TargetConfig,
};
pub use validation::validate_config;
