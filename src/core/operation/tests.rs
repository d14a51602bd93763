// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    InlineExecutor, OperationOutcome, OperationRunner, OperationState, ProgressMonitor,
    ProgressSink, foreground_channel,
};
use crate::error::{ErrorKind, RepoError};

fn runner() -> OperationRunner {
    OperationRunner::try_current(Arc::new(InlineExecutor)).expect("inside a runtime")
}

/// Collects outcomes delivered to completion callbacks.
#[derive(Clone, Default)]
struct Outcomes {
    states: Arc<Mutex<Vec<OperationState>>>,
    calls: Arc<AtomicUsize>,
}

impl Outcomes {
    fn record<T>(&self) -> impl FnOnce(OperationOutcome<T>) + Send + 'static {
        let this = self.clone();
        move |outcome| {
            this.calls.fetch_add(1, Ordering::SeqCst);
            this.states
                .lock()
                .expect("lock")
                .push(outcome.state());
        }
    }

    fn states(&self) -> Vec<OperationState> {
        self.states.lock().expect("lock").clone()
    }

    /// Callback count once `expected` callbacks ran, or after a short timeout.
    async fn settled_calls(&self, expected: usize) -> usize {
        for _ in 0..100 {
            if self.calls.load(Ordering::SeqCst) >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.calls.load(Ordering::SeqCst)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_completed_outcome_carries_value() {
    let (tx, rx) = flume::bounded(1);
    let handle = runner().start(
        "double",
        21_u32,
        |n, monitor: ProgressMonitor| async move {
            monitor.set_action("doubling");
            monitor.report_progress(1.0);
            Ok(n * 2)
        },
        move |outcome| {
            tx.send(outcome.into_result().expect("completed"))
                .expect("receiver alive");
        },
    );

    assert_eq!(handle.wait().await, OperationState::Completed);
    assert_eq!(rx.recv_async().await.expect("value"), 42);
    assert_eq!(handle.monitor().action().as_deref(), Some("doubling"));
    assert_eq!(handle.monitor().progress(), Some(1.0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_state_is_running_after_start() {
    let gate = Arc::new(tokio::sync::Notify::new());
    let release = Arc::clone(&gate);
    let outcomes = Outcomes::default();

    let handle = runner().start(
        "blocked",
        (),
        move |(), _monitor| async move {
            release.notified().await;
            Ok(())
        },
        outcomes.record::<()>(),
    );

    assert_eq!(handle.state(), OperationState::Running);
    gate.notify_one();
    assert_eq!(handle.wait().await, OperationState::Completed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failure_is_delivered_not_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let (tx, rx) = flume::bounded(1);

    let handle = runner().start(
        "fail",
        (),
        move |(), _monitor| async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(RepoError::other("boom"))
        },
        move |outcome| {
            let _ = tx.send(outcome);
        },
    );

    assert_eq!(handle.wait().await, OperationState::Failed);
    let outcome = rx.recv_async().await.expect("outcome");
    match outcome {
        OperationOutcome::Failed(err) => assert_eq!(err.kind(), ErrorKind::Other),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancellation_yields_single_cancelled_completion() {
    let outcomes = Outcomes::default();

    let handle = runner().start(
        "loop",
        (),
        |(), monitor: ProgressMonitor| async move {
            while !monitor.is_cancellation_requested() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            Err::<(), _>(RepoError::Cancelled)
        },
        outcomes.record::<()>(),
    );

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(handle.cancel());
    assert_eq!(handle.wait().await, OperationState::Cancelled);

    // Terminal state is final; further cancels are ignored
    assert!(!handle.cancel());
    assert_eq!(outcomes.settled_calls(1).await, 1);
    assert_eq!(outcomes.states(), vec![OperationState::Cancelled]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_work_ignoring_cancel_still_completes() {
    let gate = Arc::new(tokio::sync::Notify::new());
    let release = Arc::clone(&gate);
    let outcomes = Outcomes::default();

    let handle = runner().start(
        "stubborn",
        7_u32,
        move |n, _monitor| async move {
            release.notified().await;
            Ok(n)
        },
        outcomes.record::<u32>(),
    );

    assert!(handle.cancel());
    assert!(handle.monitor().is_cancellation_requested());
    gate.notify_one();

    // A finished value wins over a cancel request the work never observed
    assert_eq!(handle.wait().await, OperationState::Completed);
    assert!(!handle.cancel());
    assert_eq!(outcomes.settled_calls(1).await, 1);
    assert_eq!(outcomes.states(), vec![OperationState::Completed]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_panic_becomes_failure() {
    let outcomes = Outcomes::default();
    let handle = runner().start(
        "panics",
        (),
        |(), _monitor| async move {
            if true {
                panic!("worker exploded");
            }
            Ok(())
        },
        outcomes.record::<()>(),
    );

    assert_eq!(handle.wait().await, OperationState::Failed);
    assert_eq!(outcomes.settled_calls(1).await, 1);
    assert_eq!(outcomes.states(), vec![OperationState::Failed]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_foreground_queue_runs_completion_on_owner() {
    let (executor, queue) = foreground_channel();
    let runner = runner();
    let outcomes = Outcomes::default();

    let handle = runner.start_on(
        Arc::new(executor),
        "fg",
        (),
        |(), _monitor| async move { Ok(()) },
        outcomes.record::<()>(),
    );

    assert_eq!(handle.wait().await, OperationState::Completed);
    // The queue owner has not drained it yet
    assert_eq!(outcomes.calls.load(Ordering::SeqCst), 0);
    assert!(queue.run_next().await);
    assert_eq!(outcomes.calls.load(Ordering::SeqCst), 1);
    assert_eq!(queue.run_pending(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_dropped_queue_runs_completion_inline() {
    let (executor, queue) = foreground_channel();
    drop(queue);
    let outcomes = Outcomes::default();

    let handle = runner().start_on(
        Arc::new(executor),
        "orphan",
        (),
        |(), _monitor| async move { Ok(()) },
        outcomes.record::<()>(),
    );

    handle.wait().await;
    assert_eq!(outcomes.settled_calls(1).await, 1);
}

#[test]
fn test_progress_is_clamped() {
    let monitor = ProgressMonitor::detached("clamp");
    monitor.report_progress(3.5);
    assert_eq!(monitor.progress(), Some(1.0));
    monitor.report_progress(-1.0);
    assert_eq!(monitor.progress(), Some(0.0));
    monitor.report_progress(f64::NAN);
    assert_eq!(monitor.progress(), Some(0.0));
}

#[test]
fn test_sink_receives_updates() {
    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl ProgressSink for Recorder {
        fn on_action(&self, title: &str, action: &str) {
            self.0.lock().expect("lock").push(format!("{title}: {action}"));
        }
    }

    let recorder = Arc::new(Recorder::default());
    let monitor = ProgressMonitor::new(
        "fetch origin",
        tokio_util::sync::CancellationToken::new(),
        Some(recorder.clone()),
    );
    monitor.set_action("receiving objects");

    assert_eq!(
        *recorder.0.lock().expect("lock"),
        vec!["fetch origin: receiving objects".to_string()]
    );
}
