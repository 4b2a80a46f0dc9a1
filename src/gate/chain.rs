//! Probe/backoff loop for a single target.

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::TargetConfig;
use crate::gate::state::{ChainSnapshot, RetryChain};
use crate::navigation::Navigator;
use crate::observability::metrics;
use crate::probe::Prober;
use crate::resilience::backoff::{format_secs, BackoffPolicy};

/// How a chain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The target was reachable and was handed to the navigator.
    Redirected { attempts: u32 },
    /// The chain's token fired first. No redirect happened.
    Cancelled { attempts: u32 },
}

impl GateOutcome {
    pub fn attempts(&self) -> u32 {
        match *self {
            GateOutcome::Redirected { attempts } | GateOutcome::Cancelled { attempts } => attempts,
        }
    }
}

/// Waits for one target to become reachable, then redirects to it.
///
/// Failed probes never surface as errors; they only stretch the retry
/// interval. The only ways out are a reachable probe or cancellation.
pub struct BootstrapGate<P, N> {
    chain: RetryChain,
    name: String,
    policy: BackoffPolicy,
    prober: P,
    navigator: N,
    status: watch::Sender<ChainSnapshot>,
}

impl<P: Prober, N: Navigator> BootstrapGate<P, N> {
    pub fn new(target: &TargetConfig, policy: BackoffPolicy, prober: P, navigator: N) -> Self {
        let chain = RetryChain::new(target.url.clone());
        let (status, _) = watch::channel(chain.snapshot());
        Self {
            chain,
            name: target.display_name(),
            policy,
            prober,
            navigator,
            status,
        }
    }

    /// Current state of the chain, updated after every transition.
    pub fn subscribe(&self) -> watch::Receiver<ChainSnapshot> {
        self.status.subscribe()
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        self.chain.snapshot()
    }

    /// Drive the chain until it redirects or `token` is cancelled.
    pub async fn run(self, token: CancellationToken) -> GateOutcome {
        let span = tracing::info_span!(
            "gate",
            chain_id = %self.chain.id(),
            target_name = %self.name
        );
        self.run_inner(token).instrument(span).await
    }

    async fn run_inner(mut self, token: CancellationToken) -> GateOutcome {
        let url = self.chain.url().clone();
        tracing::debug!(url = %url, policy = ?self.policy, "Waiting for target");

        loop {
            if token.is_cancelled() {
                return self.finish_cancelled();
            }
            self.chain.begin_probe();
            self.publish();

            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => None,
                outcome = self.prober.probe(&url) => Some(outcome),
            };
            let Some(outcome) = outcome else {
                return self.finish_cancelled();
            };

            metrics::record_probe(&self.name, outcome.label());
            tracing::debug!(attempt = self.chain.attempts(), outcome = %outcome, "Probe finished");

            if outcome.is_reachable() {
                return self.finish_redirected();
            }

            let interval = self.chain.record_failure(&self.policy);
            self.publish();
            metrics::record_retry(&self.name, interval);
            tracing::info!(
                url = %url,
                attempt = self.chain.attempts(),
                interval_ms = interval.as_millis() as u64,
                "Could not load app as it cannot be reached, trying again in {}s",
                format_secs(interval)
            );

            let fired = tokio::select! {
                biased;
                _ = token.cancelled() => false,
                _ = tokio::time::sleep(interval) => true,
            };
            if !fired {
                return self.finish_cancelled();
            }
        }
    }

    fn finish_redirected(mut self) -> GateOutcome {
        self.chain.redirect();
        self.publish();

        let url = self.chain.url();
        if let Err(e) = self.navigator.navigate(url) {
            tracing::error!(url = %url, error = %e, "Redirect handoff failed");
        }
        metrics::record_redirect(&self.name);

        GateOutcome::Redirected {
            attempts: self.chain.attempts(),
        }
    }

    fn finish_cancelled(mut self) -> GateOutcome {
        self.chain.cancel();
        self.publish();
        tracing::info!(
            url = %self.chain.url(),
            attempts = self.chain.attempts(),
            "Gate cancelled before target became reachable"
        );

        GateOutcome::Cancelled {
            attempts: self.chain.attempts(),
        }
    }

    fn publish(&self) {
        self.status.send_replace(self.chain.snapshot());
    }
}
