//! Spawned chains and their control handles.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;
use uuid::Uuid;

use crate::config::TargetConfig;
use crate::error::GateError;
use crate::gate::chain::{BootstrapGate, GateOutcome};
use crate::gate::state::ChainSnapshot;
use crate::navigation::Navigator;
use crate::probe::Prober;
use crate::resilience::BackoffPolicy;

/// Handle to a chain running on the tokio runtime.
pub struct GateHandle {
    id: Uuid,
    url: Url,
    token: CancellationToken,
    status: watch::Receiver<ChainSnapshot>,
    task: JoinHandle<GateOutcome>,
}

impl GateHandle {
    /// Spawn `gate` as its own task, stopped by `token`.
    pub fn spawn<P: Prober, N: Navigator>(
        gate: BootstrapGate<P, N>,
        token: CancellationToken,
    ) -> Self {
        let snapshot = gate.snapshot();
        let status = gate.subscribe();
        let task = tokio::spawn(gate.run(token.clone()));

        Self {
            id: snapshot.id,
            url: snapshot.url,
            token,
            status,
            task,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Stop the chain. Has no effect once it has redirected.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Latest published state.
    pub fn snapshot(&self) -> ChainSnapshot {
        self.status.borrow().clone()
    }

    /// Receiver notified on every transition.
    pub fn status(&self) -> watch::Receiver<ChainSnapshot> {
        self.status.clone()
    }

    /// Wait for the chain to end.
    pub async fn wait(self) -> Result<GateOutcome, GateError> {
        self.task.await.map_err(|source| GateError::Join {
            url: self.url.to_string(),
            source,
        })
    }
}

/// Spawn one independent chain per target.
///
/// Each chain gets a child of `parent`, so cancelling `parent` stops them
/// all while [`GateHandle::cancel`] stops only one.
pub fn spawn_all<P, N>(
    targets: &[TargetConfig],
    policy: BackoffPolicy,
    prober: P,
    navigator: N,
    parent: &CancellationToken,
) -> Vec<GateHandle>
where
    P: Prober + Clone,
    N: Navigator + Clone,
{
    targets
        .iter()
        .map(|target| {
            let gate = BootstrapGate::new(target, policy, prober.clone(), navigator.clone());
            GateHandle::spawn(gate, parent.child_token())
        })
        .collect()
}
