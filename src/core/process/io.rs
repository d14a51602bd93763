// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O draining and waiting for a spawned child.
//!
//! ```text
//! run_child()
//!   stdin writer task (optional)
//!   stdout/stderr reader tasks --> Vec<u8>
//!   select! { wait | cancel (KILL_ON_CANCEL only) | timeout }
//!   --> ProcessOutput { stdout, stderr, exit_code, interrupted }
//! ```

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{ProcessError, RepoResult};

/// Drains a pipe to completion in its own task.
fn spawn_reader<R>(reader: Option<R>, process_name: &str, stream: &'static str) -> Option<JoinHandle<Vec<u8>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    reader.map(|mut reader| {
        let name = process_name.to_string();
        tokio::spawn(async move {
            let mut buffer = Vec::new();
            if let Err(e) = reader.read_to_end(&mut buffer).await {
                warn!(process = %name, stream, error = %e, "error reading stream");
            }
            buffer
        })
    })
}

async fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => Vec::new(),
    }
}

/// Resolves when the token fires, or never when cancellation must not kill.
async fn kill_signal(token: &CancellationToken, kill_on_cancel: bool) {
    if kill_on_cancel {
        token.cancelled().await;
    } else {
        std::future::pending::<()>().await;
    }
}

async fn deadline(timeout: Option<Duration>) {
    match timeout {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending::<()>().await,
    }
}

impl ProcessBuilder {
    /// Drives a spawned child to completion.
    pub(super) async fn run_child(
        &self,
        name: &str,
        command_line: &str,
        child: &mut Child,
        token: &CancellationToken,
    ) -> RepoResult<ProcessOutput> {
        let stdout_handle = spawn_reader(child.stdout.take(), name, "stdout");
        let stderr_handle = spawn_reader(child.stderr.take(), name, "stderr");
        let stdin_handle = self.spawn_stdin_writer(child);

        let kill_on_cancel = self.process_flags().contains(ProcessFlags::KILL_ON_CANCEL);
        let wait_error = |source| ProcessError::Io {
            command: command_line.to_string(),
            source,
        };

        let (status, interrupted) = tokio::select! {
            status = child.wait() => (status.map_err(wait_error)?, false),
            () = kill_signal(token, kill_on_cancel) => {
                warn!(process = %name, "cancellation requested, killing process");
                child.kill().await.ok();
                (child.wait().await.map_err(wait_error)?, true)
            }
            () = deadline(self.timeout_duration()) => {
                let timeout = self.timeout_duration().unwrap_or_default();
                warn!(process = %name, timeout = ?timeout, "process timed out");
                child.kill().await.ok();
                child.wait().await.map_err(wait_error)?;
                return Err(ProcessError::Timeout {
                    command: command_line.to_string(),
                    timeout_secs: timeout.as_secs(),
                }
                .into());
            }
        };

        if let Some(handle) = stdin_handle
            && let Ok(Err(source)) = handle.await
            && source.kind() != std::io::ErrorKind::BrokenPipe
            && !interrupted
        {
            return Err(ProcessError::StdinFailed {
                command: command_line.to_string(),
                source,
            }
            .into());
        }

        let stdout = join_reader(stdout_handle).await;
        let stderr = join_reader(stderr_handle).await;

        for line in String::from_utf8_lossy(&stderr).lines() {
            trace!(process = %name, stream = "stderr", line = %line, "output");
        }

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            stdout,
            stderr,
            interrupted,
        ))
    }

    /// Writes stdin in a separate task so a child filling its stdout pipe
    /// cannot deadlock against us.
    fn spawn_stdin_writer(&self, child: &mut Child) -> Option<JoinHandle<std::io::Result<()>>> {
        let content = self.stdin_content()?.to_vec();
        let mut stdin = child.stdin.take()?;
        Some(tokio::spawn(async move {
            stdin.write_all(&content).await?;
            stdin.shutdown().await
        }))
    }
}
