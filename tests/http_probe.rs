//! HTTP prober and end-to-end gate tests against local targets.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bootgate::config::{ProbeConfig, TargetConfig};
use bootgate::{BackoffPolicy, BootstrapGate, GateOutcome, HttpProber, ProbeOutcome, Prober};
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

mod common;

use common::{LogCapture, RecordingNavigator};

fn prober() -> HttpProber {
    let config = ProbeConfig {
        timeout_secs: 1,
        connect_timeout_secs: 1,
        no_proxy: true,
        ..ProbeConfig::default()
    };
    HttpProber::new(&config).expect("client")
}

#[tokio::test]
async fn test_success_status_is_reachable() {
    let addr = common::start_fixed_target(200).await;
    let outcome = prober().probe(&common::url_for(addr)).await;
    assert_eq!(outcome, ProbeOutcome::Reachable(StatusCode::OK));
}

#[tokio::test]
async fn test_no_content_is_reachable() {
    let addr = common::start_fixed_target(204).await;
    let outcome = prober().probe(&common::url_for(addr)).await;
    assert!(outcome.is_reachable());
}

#[tokio::test]
async fn test_server_error_is_error_status() {
    let addr = common::start_fixed_target(500).await;
    let outcome = prober().probe(&common::url_for(addr)).await;
    assert_eq!(
        outcome,
        ProbeOutcome::ErrorStatus(StatusCode::INTERNAL_SERVER_ERROR)
    );
}

#[tokio::test]
async fn test_not_found_is_error_status() {
    let addr = common::start_fixed_target(404).await;
    let outcome = prober().probe(&common::url_for(addr)).await;
    assert_eq!(outcome, ProbeOutcome::ErrorStatus(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_refused_connection_is_no_response() {
    let addr = common::closed_addr().await;
    let outcome = prober().probe(&common::url_for(addr)).await;
    assert!(matches!(outcome, ProbeOutcome::NoResponse(_)), "{outcome:?}");
}

#[tokio::test]
async fn test_silent_target_times_out() {
    let addr = common::start_silent_target().await;
    let outcome = prober().probe(&common::url_for(addr)).await;
    assert!(matches!(outcome, ProbeOutcome::NoResponse(_)), "{outcome:?}");
}

#[tokio::test]
async fn test_probe_uses_head() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();
    let addr = common::start_programmable_target(move |line| {
        let recorded = recorded.clone();
        async move {
            recorded.lock().unwrap().push(line);
            200
        }
    })
    .await;

    prober().probe(&common::url_for(addr)).await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].starts_with("HEAD / HTTP/1.1"), "{}", seen[0]);
}

#[tokio::test]
async fn test_gate_waits_for_target_to_come_up() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let addr = common::start_programmable_target(move |_| {
        let counter = counter.clone();
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                503
            } else {
                200
            }
        }
    })
    .await;

    let url = common::url_for(addr);
    let navigator = RecordingNavigator::default();
    let policy = BackoffPolicy {
        start: Duration::from_millis(50),
        increase: Duration::from_millis(50),
        max: Duration::from_millis(100),
    };
    let gate = BootstrapGate::new(
        &TargetConfig::new(url.clone()),
        policy,
        prober(),
        navigator.clone(),
    );

    let outcome = tokio::time::timeout(Duration::from_secs(5), gate.run(CancellationToken::new()))
        .await
        .expect("gate should finish");

    assert_eq!(outcome, GateOutcome::Redirected { attempts: 3 });
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(navigator.visits(), vec![url]);
}

#[tokio::test]
async fn test_gate_against_dead_target_until_cancelled() {
    let addr = common::closed_addr().await;
    let navigator = RecordingNavigator::default();
    let policy = BackoffPolicy {
        start: Duration::from_millis(20),
        increase: Duration::from_millis(20),
        max: Duration::from_millis(40),
    };
    let gate = BootstrapGate::new(
        &TargetConfig::new(common::url_for(addr)),
        policy,
        prober(),
        navigator.clone(),
    );
    let token = CancellationToken::new();
    let task = tokio::spawn(gate.run(token.clone()));

    tokio::time::sleep(Duration::from_millis(300)).await;
    token.cancel();

    let outcome = task.await.unwrap();
    assert!(matches!(outcome, GateOutcome::Cancelled { attempts } if attempts >= 2));
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn test_each_outcome_logs_its_own_line() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let up = common::url_for(common::start_fixed_target(200).await);
    let failing = common::url_for(common::start_fixed_target(500).await);
    let down = common::url_for(common::closed_addr().await);

    let prober = prober();
    prober.probe(&up).await;
    prober.probe(&failing).await;
    prober.probe(&down).await;

    let text = logs.contents();
    assert_eq!(
        logs.count(&format!("Connection available to {up}, loading app.")),
        1,
        "{text}"
    );
    assert_eq!(
        logs.count(&format!("Connection available to {failing} but has error status")),
        1,
        "{text}"
    );
    assert_eq!(
        logs.count(&format!("No connection available to {down}")),
        1,
        "{text}"
    );
    assert_eq!(logs.count("but has error status"), 1, "{text}");
    assert_eq!(logs.count("No connection available to"), 1, "{text}");
}

#[tokio::test]
async fn test_error_status_and_dead_target_differ_only_in_log_text() {
    let logs = LogCapture::default();
    let _guard = logs.install();
    let policy = BackoffPolicy {
        start: Duration::from_millis(20),
        increase: Duration::from_millis(20),
        max: Duration::from_millis(40),
    };

    let failing = common::url_for(common::start_fixed_target(500).await);
    let down = common::url_for(common::closed_addr().await);

    let mut attempts = Vec::new();
    for url in [&failing, &down] {
        let gate = BootstrapGate::new(
            &TargetConfig::new(url.clone()),
            policy,
            prober(),
            RecordingNavigator::default(),
        );
        let token = CancellationToken::new();
        let task = gate.run(token.clone());
        let stop = async {
            tokio::time::sleep(Duration::from_millis(150)).await;
            token.cancel();
        };
        let (outcome, _) = tokio::join!(task, stop);
        attempts.push(outcome.attempts());
    }

    let text = logs.contents();
    assert!(attempts.iter().all(|&n| n >= 2), "{attempts:?}");
    assert!(logs.count(&format!("{failing} but has error status")) >= 2, "{text}");
    assert_eq!(logs.count(&format!("No connection available to {failing}")), 0, "{text}");
    assert!(logs.count(&format!("No connection available to {down}")) >= 2, "{text}");
    assert_eq!(logs.count(&format!("{down} but has error status")), 0, "{text}");
    assert!(logs.count("trying again in 0.02s") >= 2, "{text}");
}
