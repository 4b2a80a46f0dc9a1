//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::resilience::backoff::{INTERVAL_INCREASE_MS, MAX_INTERVAL_MS, START_INTERVAL_MS};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Targets to wait for.
    pub targets: Vec<TargetConfig>,

    /// Retry interval settings.
    pub backoff: BackoffConfig,

    /// Probe request settings.
    pub probe: ProbeConfig,

    /// What happens once a target is reachable.
    pub navigation: NavigationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A single target URL.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TargetConfig {
    /// Target identifier for logging/metrics. Defaults to `host:port`, or
    /// the host alone when the URL has no explicit port.
    #[serde(default)]
    pub name: Option<String>,

    /// URL to probe and redirect to.
    pub url: Url,
}

impl TargetConfig {
    /// Create a target with no explicit name.
    pub fn new(url: Url) -> Self {
        Self { name: None, url }
    }

    /// Name used in logs and metric labels: the configured name, else
    /// `host[:port]`.
    pub fn display_name(&self) -> String {
        match (&self.name, self.url.host_str(), self.url.port()) {
            (Some(name), _, _) => name.clone(),
            (None, Some(host), Some(port)) => format!("{}:{}", host, port),
            (None, Some(host), None) => host.to_string(),
            (None, None, _) => self.url.to_string(),
        }
    }
}

/// Backoff configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct BackoffConfig {
    /// Delay after the first failed probe in milliseconds.
    pub start_interval_ms: u64,

    /// Delay growth per failed probe in milliseconds.
    pub interval_increase_ms: u64,

    /// Maximum delay in milliseconds.
    pub max_interval_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            start_interval_ms: START_INTERVAL_MS,
            interval_increase_ms: INTERVAL_INCREASE_MS,
            max_interval_ms: MAX_INTERVAL_MS,
        }
    }
}

/// Probe request configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Total time allowed for one probe in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every probe.
    pub user_agent: String,

    /// Ignore proxy settings from the environment.
    pub no_proxy: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
            user_agent: "bootgate-probe".to_string(),
            no_proxy: false,
        }
    }
}

/// How the redirect is carried out.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Write the URL to stdout.
    #[default]
    Print,
    /// Launch `command` with the URL.
    Spawn,
}

/// Navigation configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NavigationConfig {
    pub mode: NavigationMode,

    /// Launcher program for `spawn` mode.
    pub command: String,

    /// Launcher arguments. `{url}` is replaced with the target URL.
    pub args: Vec<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
