//! Retry chain state machine.
//!
//! # States
//! - Probing: a probe is in flight
//! - Waiting: the last probe failed, a retry timer is pending
//! - Redirected: the target was reachable and handed off (terminal)
//! - Cancelled: the chain's token fired (terminal)
//!
//! # State Transitions
//! ```text
//! Probing → Redirected: probe reachable
//! Probing → Waiting:    probe unreachable (interval recomputed)
//! Waiting → Probing:    timer fired
//! Probing | Waiting → Cancelled: token cancelled
//! ```

use std::fmt;
use std::time::Duration;

use url::Url;
use uuid::Uuid;

use crate::resilience::BackoffPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Probing,
    Waiting,
    Redirected,
    Cancelled,
}

impl GateState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GateState::Redirected | GateState::Cancelled)
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateState::Probing => "probing",
            GateState::Waiting => "waiting",
            GateState::Redirected => "redirected",
            GateState::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Point-in-time view of a chain, published after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSnapshot {
    pub id: Uuid,
    pub url: Url,
    pub state: GateState,
    /// Probes started so far.
    pub attempts: u32,
    /// Interval of the pending (or last) retry. `None` before the first
    /// failure and after the chain ends.
    pub interval: Option<Duration>,
}

/// State of one target's probe/wait loop.
///
/// Owned by exactly one task; the interval is never shared between chains.
#[derive(Debug, Clone)]
pub struct RetryChain {
    id: Uuid,
    url: Url,
    state: GateState,
    attempts: u32,
    interval: Option<Duration>,
}

impl RetryChain {
    pub fn new(url: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            state: GateState::Probing,
            attempts: 0,
            interval: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Enter `Probing` for a new attempt.
    pub fn begin_probe(&mut self) {
        debug_assert!(!self.state.is_terminal(), "probe after chain ended");
        self.attempts = self.attempts.saturating_add(1);
        self.state = GateState::Probing;
    }

    /// Record an unreachable probe and return the interval to wait.
    pub fn record_failure(&mut self, policy: &BackoffPolicy) -> Duration {
        debug_assert_eq!(self.state, GateState::Probing);
        let next = policy.next_interval(self.interval);
        self.interval = Some(next);
        self.state = GateState::Waiting;
        next
    }

    pub fn redirect(&mut self) {
        debug_assert_eq!(self.state, GateState::Probing);
        self.interval = None;
        self.state = GateState::Redirected;
    }

    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.interval = None;
        self.state = GateState::Cancelled;
    }

    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            id: self.id,
            url: self.url.clone(),
            state: self.state,
            attempts: self.attempts,
            interval: self.interval,
        }
    }
}
