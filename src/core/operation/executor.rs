// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Completion executors decide where `on_completed` callbacks run.
//!
//! ```text
//! worker task --execute(completion)--> InlineExecutor     runs it right there
//!                                  \-> ForegroundExecutor --flume--> ForegroundQueue
//!                                                                   run_pending()/run_next()
//!                                                                   on the owning task
//! ```

use std::time::Duration;

use tracing::warn;

/// A completion callback ready to run.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// Runs completion callbacks of finished operations.
pub trait CompletionExecutor: Send + Sync {
    /// Schedules `completion`. It must run exactly once.
    fn execute(&self, completion: Completion);
}

/// Runs completions immediately on the worker that finished the work.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl CompletionExecutor for InlineExecutor {
    fn execute(&self, completion: Completion) {
        completion();
    }
}

/// Sends completions to a [`ForegroundQueue`] drained by one owning task.
#[derive(Clone)]
pub struct ForegroundExecutor {
    tx: flume::Sender<Completion>,
}

/// Receiving side of a [`ForegroundExecutor`].
pub struct ForegroundQueue {
    rx: flume::Receiver<Completion>,
}

/// Creates a connected foreground executor and queue.
#[must_use]
pub fn foreground_channel() -> (ForegroundExecutor, ForegroundQueue) {
    let (tx, rx) = flume::unbounded();
    (ForegroundExecutor { tx }, ForegroundQueue { rx })
}

impl CompletionExecutor for ForegroundExecutor {
    fn execute(&self, completion: Completion) {
        // A dropped queue must not swallow the callback
        if let Err(flume::SendError(completion)) = self.tx.send(completion) {
            warn!("foreground queue is gone, running completion inline");
            completion();
        }
    }
}

impl ForegroundQueue {
    /// Runs every queued completion without waiting. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut count = 0;
        while let Ok(completion) = self.rx.try_recv() {
            completion();
            count += 1;
        }
        count
    }

    /// Waits for the next completion and runs it.
    ///
    /// Returns `false` once every executor is dropped and the queue is empty.
    pub async fn run_next(&self) -> bool {
        match self.rx.recv_async().await {
            Ok(completion) => {
                completion();
                true
            }
            Err(_) => false,
        }
    }

    /// Blocking variant of [`run_next`](Self::run_next) with a timeout.
    ///
    /// Returns `false` if nothing arrived in time.
    pub fn run_next_blocking(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => {
                completion();
                true
            }
            Err(_) => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
