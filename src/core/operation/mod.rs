// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Asynchronous operation framework.
//!
//! ```text
//! OperationRunner::start(title, payload, work, on_completed)
//!     |  state: Created --> Running (before start returns)
//!     v
//! runtime.spawn(work(payload, monitor))      span "operation"
//!     |
//!     v
//! supervisor awaits the JoinHandle
//!     Ok(value)                  --> Completed(value)
//!     Err(Cancelled)             --> Cancelled
//!     Err(_) after cancel()      --> Cancelled
//!     Err(e)                     --> Failed(e)
//!     panic                      --> Failed(Other)
//!     |
//!     v  state set, then exactly one dispatch
//! executor.execute(on_completed(outcome))
//! ```
//!
//! Cancellation never aborts the work future; the work sees the request
//! through its [`ProgressMonitor`]. Nothing is retried.

mod executor;
mod handle;
mod monitor;
#[cfg(test)]
mod tests;

use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument as _;

use crate::error::{RepoError, RepoResult};

pub use executor::{
    Completion, CompletionExecutor, ForegroundExecutor, ForegroundQueue, InlineExecutor,
    foreground_channel,
};
pub use handle::{OperationHandle, OperationState};
pub use monitor::{ProgressMonitor, ProgressSink};

/// Result delivered to `on_completed`.
#[derive(Debug)]
pub enum OperationOutcome<T> {
    Completed(T),
    Failed(RepoError),
    Cancelled,
}

impl<T> OperationOutcome<T> {
    /// Terminal state matching this outcome.
    #[must_use]
    pub const fn state(&self) -> OperationState {
        match self {
            Self::Completed(_) => OperationState::Completed,
            Self::Failed(_) => OperationState::Failed,
            Self::Cancelled => OperationState::Cancelled,
        }
    }

    /// Converts into a result; cancellation becomes `RepoError::Cancelled`.
    ///
    /// # Errors
    ///
    /// The failure, or `RepoError::Cancelled`.
    pub fn into_result(self) -> RepoResult<T> {
        match self {
            Self::Completed(value) => Ok(value),
            Self::Failed(err) => Err(err),
            Self::Cancelled => Err(RepoError::Cancelled),
        }
    }
}

/// Starts operations on a tokio runtime and routes their completions.
#[derive(Clone)]
pub struct OperationRunner {
    runtime: Handle,
    executor: Arc<dyn CompletionExecutor>,
    sink: Option<Arc<dyn ProgressSink>>,
}

impl OperationRunner {
    pub fn new(runtime: Handle, executor: Arc<dyn CompletionExecutor>) -> Self {
        Self {
            runtime,
            executor,
            sink: None,
        }
    }

    /// Runner on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Fails when called outside a runtime.
    pub fn try_current(executor: Arc<dyn CompletionExecutor>) -> RepoResult<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| RepoError::other(format!("no tokio runtime: {e}")))?;
        Ok(Self::new(runtime, executor))
    }

    /// Forwards progress of every started operation to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Default completion executor of this runner.
    #[must_use]
    pub fn executor(&self) -> Arc<dyn CompletionExecutor> {
        Arc::clone(&self.executor)
    }

    /// Starts `work` on the runtime and returns immediately.
    ///
    /// `on_completed` runs exactly once, on this runner's executor.
    pub fn start<P, T, W, Fut, C>(
        &self,
        title: impl Into<String>,
        payload: P,
        work: W,
        on_completed: C,
    ) -> OperationHandle
    where
        P: Send + 'static,
        T: Send + 'static,
        W: FnOnce(P, ProgressMonitor) -> Fut + Send + 'static,
        Fut: Future<Output = RepoResult<T>> + Send + 'static,
        C: FnOnce(OperationOutcome<T>) + Send + 'static,
    {
        self.start_on(self.executor(), title, payload, work, on_completed)
    }

    /// Like [`start`](Self::start) with an explicit completion executor.
    pub fn start_on<P, T, W, Fut, C>(
        &self,
        executor: Arc<dyn CompletionExecutor>,
        title: impl Into<String>,
        payload: P,
        work: W,
        on_completed: C,
    ) -> OperationHandle
    where
        P: Send + 'static,
        T: Send + 'static,
        W: FnOnce(P, ProgressMonitor) -> Fut + Send + 'static,
        Fut: Future<Output = RepoResult<T>> + Send + 'static,
        C: FnOnce(OperationOutcome<T>) + Send + 'static,
    {
        let title = title.into();
        let monitor = ProgressMonitor::new(title.clone(), CancellationToken::new(), self.sink.clone());
        let handle = OperationHandle::new(monitor.clone());
        handle.transition(OperationState::Running);

        let span = tracing::info_span!("operation", title = %title);
        tracing::debug!(parent: &span, "started");

        let work_monitor = monitor.clone();
        let task = self
            .runtime
            .spawn(async move { work(payload, work_monitor).await }.instrument(span.clone()));

        let supervised = handle.clone();
        self.runtime.spawn(
            async move {
                let outcome = match task.await {
                    Ok(Ok(value)) => OperationOutcome::Completed(value),
                    Ok(Err(err)) if err.is_cancelled() || monitor.is_cancellation_requested() => {
                        tracing::debug!(error = %err, "work stopped after cancellation");
                        OperationOutcome::Cancelled
                    }
                    Ok(Err(err)) => OperationOutcome::Failed(err),
                    Err(join_err) if join_err.is_panic() => {
                        let message = panic_message(join_err.into_panic());
                        tracing::error!(panic = %message, "work panicked");
                        OperationOutcome::Failed(RepoError::other(format!(
                            "operation panicked: {message}"
                        )))
                    }
                    Err(_) => OperationOutcome::Cancelled,
                };

                let state = outcome.state();
                supervised.transition(state);
                match &outcome {
                    OperationOutcome::Failed(err) => tracing::warn!(error = %err, "failed"),
                    _ => tracing::debug!(%state, "finished"),
                }

                executor.execute(Box::new(move || on_completed(outcome)));
            }
            .instrument(span),
        );

        handle
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
