//! Error types.
//!
//! Probe failures are not errors here: they are [`ProbeOutcome`] values and
//! only ever turn into retries. The types below cover the surfaces around
//! the gate (configuration, redirect handoff, task plumbing).
//!
//! [`ProbeOutcome`]: crate::probe::ProbeOutcome

use std::path::PathBuf;

use thiserror::Error;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("backoff.start_interval_ms must be greater than zero")]
    ZeroStartInterval,

    #[error("backoff.max_interval_ms ({max_ms}) is below backoff.start_interval_ms ({start_ms})")]
    MaxBelowStart { start_ms: u64, max_ms: u64 },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("probe.connect_timeout_secs ({connect_secs}) exceeds probe.timeout_secs ({timeout_secs})")]
    ConnectTimeoutTooLong { connect_secs: u64, timeout_secs: u64 },

    #[error("target {0} must use http or https")]
    UnsupportedScheme(String),

    #[error("duplicate target name {0:?}")]
    DuplicateTarget(String),

    #[error("navigation.command is required in spawn mode")]
    MissingCommand,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure to hand a reachable URL over to the host.
#[derive(Debug, Error)]
pub enum NavigateError {
    #[error("failed to write url: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to launch {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from setting up or joining gate tasks.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("no targets configured")]
    NoTargets,

    #[error("failed to build probe client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("gate task for {url} failed: {source}")]
    Join {
        url: String,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
