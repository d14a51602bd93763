// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Drives one long-running operation from the command line.
//!
//! ```text
//! run_operation(start)
//!   OperationRunner (foreground executor, spinner sink)
//!     start(runner, on_completed) --> OperationHandle
//!   loop select!
//!     queue.run_next()   completion stores the outcome
//!     ctrl_c()           handle.cancel()
//!   outcome --> anyhow::Result<T>
//! ```

use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

use anyhow::anyhow;
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::operation::{
    OperationHandle, OperationOutcome, OperationRunner, ProgressSink, foreground_channel,
};
use crate::error::{RepoResult, Result};

/// Completion callback handed to an `*_async` repository call.
pub type OnCompleted<T> = Box<dyn FnOnce(OperationOutcome<T>) + Send + 'static>;

fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {prefix}{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Shows operation progress as a terminal spinner on stderr.
///
/// Hidden automatically when stderr is not a terminal.
pub struct SpinnerSink {
    bar: ProgressBar,
}

impl SpinnerSink {
    #[must_use]
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for SpinnerSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for SpinnerSink {
    fn on_action(&self, title: &str, action: &str) {
        self.bar.set_message(format!("{title}: {action}"));
    }

    fn on_progress(&self, _title: &str, fraction: f64) {
        self.bar.set_prefix(format!("{:>3.0}% ", fraction * 100.0));
    }
}

/// Starts an operation and waits for its completion on this task.
///
/// Ctrl-C requests cancellation; the operation decides when to stop.
///
/// # Errors
///
/// The operation's failure, `Cancelled` if it stopped after a cancellation
/// request, or an error if it could not be started.
pub async fn run_operation<T, F>(start: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&OperationRunner, OnCompleted<T>) -> RepoResult<OperationHandle>,
{
    let (executor, queue) = foreground_channel();
    let spinner = Arc::new(SpinnerSink::new());
    let runner = OperationRunner::try_current(Arc::new(executor))?.with_sink(spinner.clone());

    let slot: Arc<Mutex<Option<OperationOutcome<T>>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&slot);
    let handle = start(
        &runner,
        Box::new(move |outcome| {
            *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
        }),
    );
    // The queue closes once the running operation releases its executor
    drop(runner);
    let handle = match handle {
        Ok(handle) => handle,
        Err(e) => {
            spinner.finish();
            return Err(e.into());
        }
    };

    loop {
        tokio::select! {
            ran = queue.run_next() => {
                let done = slot.lock().unwrap_or_else(PoisonError::into_inner).is_some();
                if !ran || done {
                    break;
                }
            }
            interrupted = tokio::signal::ctrl_c() => {
                if interrupted.is_ok() && handle.cancel() {
                    tracing::warn!(operation = %handle.title(), "Received Ctrl+C, cancelling...");
                }
            }
        }
    }
    spinner.finish();

    let outcome = slot
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .ok_or_else(|| anyhow!("operation '{}' ended without a result", handle.title()))?;
    Ok(outcome.into_result()?)
}
