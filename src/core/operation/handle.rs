// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Handle to an in-flight operation.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use super::monitor::ProgressMonitor;

/// Lifecycle of an operation.
///
/// ```text
/// Created --> Running --> Completed
///                    \--> Failed
///                    \--> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationState {
    Created,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl OperationState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}

struct HandleInner {
    monitor: ProgressMonitor,
    state: watch::Sender<OperationState>,
}

/// Cloneable handle returned by `OperationRunner::start`.
#[derive(Clone)]
pub struct OperationHandle {
    inner: Arc<HandleInner>,
}

impl fmt::Debug for OperationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationHandle")
            .field("title", &self.title())
            .field("state", &self.state())
            .finish()
    }
}

impl OperationHandle {
    pub(super) fn new(monitor: ProgressMonitor) -> Self {
        let (state, _) = watch::channel(OperationState::Created);
        Self {
            inner: Arc::new(HandleInner { monitor, state }),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.inner.monitor.title()
    }

    #[must_use]
    pub fn state(&self) -> OperationState {
        *self.inner.state.borrow()
    }

    #[must_use]
    pub fn monitor(&self) -> &ProgressMonitor {
        &self.inner.monitor
    }

    /// Requests cancellation.
    ///
    /// Only a running operation accepts the request; returns whether it did.
    /// The work keeps running until it observes the flag.
    pub fn cancel(&self) -> bool {
        if self.state() != OperationState::Running {
            return false;
        }
        tracing::debug!(title = %self.title(), "cancellation requested");
        self.inner.monitor.request_cancel();
        true
    }

    /// Waits until the operation reaches a terminal state.
    ///
    /// The state is final before the completion callback is dispatched, so
    /// this may return before the callback has run on its executor.
    pub async fn wait(&self) -> OperationState {
        let mut rx = self.inner.state.subscribe();
        match rx.wait_for(|state| state.is_terminal()).await {
            Ok(state) => *state,
            Err(_) => self.state(),
        }
    }

    /// Moves to `next` unless the current state is already terminal.
    pub(super) fn transition(&self, next: OperationState) -> bool {
        self.inner.state.send_if_modified(|state| {
            if state.is_terminal() || *state == next {
                false
            } else {
                *state = next;
                true
            }
        })
    }
}
