// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Progress reporting and cooperative cancellation for one operation.

use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::error::{RepoError, RepoResult};

/// Receives progress of running operations, e.g. a terminal spinner.
///
/// Called from worker threads; implementations must be cheap.
pub trait ProgressSink: Send + Sync {
    fn on_action(&self, _title: &str, _action: &str) {}

    fn on_progress(&self, _title: &str, _fraction: f64) {}
}

#[derive(Debug, Default)]
struct Progress {
    action: Option<String>,
    fraction: Option<f64>,
}

struct MonitorInner {
    title: String,
    progress: Mutex<Progress>,
    token: CancellationToken,
    sink: Option<Arc<dyn ProgressSink>>,
}

/// Handed to the work of an operation.
///
/// Cancellation is a request: work polls [`is_cancellation_requested`]
/// (or awaits [`cancellation_token`]) and decides when to stop.
///
/// [`is_cancellation_requested`]: Self::is_cancellation_requested
/// [`cancellation_token`]: Self::cancellation_token
#[derive(Clone)]
pub struct ProgressMonitor {
    inner: Arc<MonitorInner>,
}

impl std::fmt::Debug for ProgressMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressMonitor")
            .field("title", &self.inner.title)
            .field("cancelled", &self.inner.token.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl ProgressMonitor {
    pub(crate) fn new(
        title: impl Into<String>,
        token: CancellationToken,
        sink: Option<Arc<dyn ProgressSink>>,
    ) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                title: title.into(),
                progress: Mutex::new(Progress::default()),
                token,
                sink,
            }),
        }
    }

    /// A monitor not attached to any operation, for synchronous calls.
    #[must_use]
    pub fn detached(title: impl Into<String>) -> Self {
        Self::new(title, CancellationToken::new(), None)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.inner.title
    }

    /// Describes what the work is doing right now.
    pub fn set_action(&self, text: impl Into<String>) {
        let text = text.into();
        if let Some(sink) = &self.inner.sink {
            sink.on_action(&self.inner.title, &text);
        }
        self.lock().action = Some(text);
    }

    #[must_use]
    pub fn action(&self) -> Option<String> {
        self.lock().action.clone()
    }

    /// Reports completion as a fraction, clamped to `0.0..=1.0`. NaN is ignored.
    pub fn report_progress(&self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        if let Some(sink) = &self.inner.sink {
            sink.on_progress(&self.inner.title, fraction);
        }
        self.lock().fraction = Some(fraction);
    }

    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        self.lock().fraction
    }

    #[must_use]
    pub fn is_cancellation_requested(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    /// Token that fires when cancellation is requested.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.inner.token.clone()
    }

    /// Returns `RepoError::Cancelled` once cancellation was requested.
    ///
    /// # Errors
    ///
    /// `RepoError::Cancelled` if the flag is set.
    pub fn ensure_not_cancelled(&self) -> RepoResult<()> {
        if self.is_cancellation_requested() {
            Err(RepoError::Cancelled)
        } else {
            Ok(())
        }
    }

    pub(super) fn request_cancel(&self) {
        self.inner.token.cancel();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Progress> {
        self.inner
            .progress
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
