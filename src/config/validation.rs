//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals, timeouts, addresses)
//! - Detect duplicate target names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::{GateConfig, NavigationMode};
use crate::error::ValidationError;

/// Validate a parsed configuration.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let backoff = &config.backoff;
    if backoff.start_interval_ms == 0 {
        errors.push(ValidationError::ZeroStartInterval);
    }
    if backoff.max_interval_ms < backoff.start_interval_ms {
        errors.push(ValidationError::MaxBelowStart {
            start_ms: backoff.start_interval_ms,
            max_ms: backoff.max_interval_ms,
        });
    }

    let probe = &config.probe;
    if probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("probe.timeout_secs"));
    }
    if probe.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("probe.connect_timeout_secs"));
    }
    if probe.connect_timeout_secs > probe.timeout_secs {
        errors.push(ValidationError::ConnectTimeoutTooLong {
            connect_secs: probe.connect_timeout_secs,
            timeout_secs: probe.timeout_secs,
        });
    }

    let mut names = HashSet::new();
    for target in &config.targets {
        if !matches!(target.url.scheme(), "http" | "https") {
            errors.push(ValidationError::UnsupportedScheme(target.url.to_string()));
        }
        let name = target.display_name();
        if !names.insert(name.clone()) {
            errors.push(ValidationError::DuplicateTarget(name));
        }
    }

    if config.navigation.mode == NavigationMode::Spawn
        && config.navigation.command.trim().is_empty()
    {
        errors.push(ValidationError::MissingCommand);
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
