//! Reachability probing.
//!
//! # Responsibilities
//! - Issue one lightweight existence check per call
//! - Classify the result as reachable, error status, or no response
//!
//! # Design Decisions
//! - Probing never fails: every result is a [`ProbeOutcome`]
//! - Probers are stateless; concurrent calls are independent
//! - The trait is the seam the gate is tested through

pub mod http;

use std::fmt;
use std::future::Future;

use reqwest::StatusCode;
use url::Url;

pub use self::http::HttpProber;

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The remote answered with a success status.
    Reachable(StatusCode),
    /// The remote answered, but not with a success status.
    ErrorStatus(StatusCode),
    /// The request did not complete (connect, DNS, timeout, TLS, ...).
    NoResponse(String),
}

impl ProbeOutcome {
    /// Map a response status onto an outcome.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            ProbeOutcome::Reachable(status)
        } else {
            ProbeOutcome::ErrorStatus(status)
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable(_))
    }

    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Reachable(_) => "reachable",
            ProbeOutcome::ErrorStatus(_) => "error_status",
            ProbeOutcome::NoResponse(_) => "no_response",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Reachable(status) => write!(f, "reachable ({})", status),
            ProbeOutcome::ErrorStatus(status) => write!(f, "responded with error ({})", status),
            ProbeOutcome::NoResponse(reason) => write!(f, "no connection ({})", reason),
        }
    }
}

/// Something that can check whether a URL is reachable.
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, url: &Url) -> impl Future<Output = ProbeOutcome> + Send;
}

impl<P: Prober> Prober for std::sync::Arc<P> {
    fn probe(&self, url: &Url) -> impl Future<Output = ProbeOutcome> + Send {
        (**self).probe(url)
    }
}
