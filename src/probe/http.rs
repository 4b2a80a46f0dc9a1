//! HTTP `HEAD` prober.

use std::time::Duration;

use url::Url;

use crate::config::ProbeConfig;
use crate::probe::{ProbeOutcome, Prober};

/// Probes targets with a `HEAD` request, ignoring any body.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Build a prober from configuration.
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone());
        if config.no_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Prober for HttpProber {
    async fn probe(&self, url: &Url) -> ProbeOutcome {
        let outcome = match self.client.head(url.clone()).send().await {
            Ok(response) => ProbeOutcome::from_status(response.status()),
            Err(e) => ProbeOutcome::NoResponse(describe(&e)),
        };

        match &outcome {
            ProbeOutcome::Reachable(status) => {
                tracing::info!(url = %url, status = %status, "Connection available to {}, loading app.", url);
            }
            ProbeOutcome::ErrorStatus(status) => {
                tracing::warn!(url = %url, status = %status, "Connection available to {} but has error status", url);
            }
            ProbeOutcome::NoResponse(reason) => {
                tracing::warn!(url = %url, error = %reason, "No connection available to {}", url);
            }
        }

        outcome
    }
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "timed out".to_string()
    } else if e.is_connect() {
        format!("connect failed: {}", e)
    } else if e.is_redirect() {
        "too many redirects".to_string()
    } else {
        e.to_string()
    }
}
