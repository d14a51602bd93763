// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, stdio
//!              |
//!              v
//!          spawn() --(io error)--> LaunchError
//!              |
//!              v
//!         run_child()
//!              |
//!              v
//!       ProcessOutput
//!    { exit_code, stdout, stderr, interrupted }
//!
//! run_checked() = run() + exit code validation
//! ```

use std::fmt::Write as _;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{ExternalExitError, LaunchError, RepoError, RepoResult};
use crate::utility::encoding::{Encoding, bytes_to_utf8};

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string, quoting arguments with spaces.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = self.display_name();
        for arg in self.args_slice() {
            if arg.is_empty() || arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and waits for it, capturing stdout and stderr.
    ///
    /// A non-zero exit code is returned in the output, not as an error.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `LaunchError` if the process cannot be started.
    /// - `ProcessError::Timeout` if a configured timeout elapses.
    /// - `ProcessError::Io` if waiting on the child fails.
    pub async fn run(self) -> RepoResult<ProcessOutput> {
        self.run_with_cancellation(CancellationToken::new()).await
    }

    /// Like [`run`](Self::run), observing a cancellation token.
    ///
    /// A token already cancelled before spawning yields an interrupted output
    /// without starting anything. Once the child runs, the token only kills
    /// it when `ProcessFlags::KILL_ON_CANCEL` is set; otherwise the child
    /// runs to completion.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn run_with_cancellation(self, token: CancellationToken) -> RepoResult<ProcessOutput> {
        if token.is_cancelled() {
            return Ok(ProcessOutput::new(-1, Vec::new(), Vec::new(), true));
        }

        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command();
        let mut child = self.spawn(&mut command)?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self
            .run_child(&name, &cmd_line, &mut child, &token)
            .await?;

        trace!(
            process = %name,
            exit_code = output.exit_code(),
            interrupted = output.is_interrupted(),
            "completed"
        );
        Ok(output)
    }

    /// Runs the process and fails unless the exit code is a success code.
    ///
    /// # Errors
    ///
    /// Everything [`run`](Self::run) returns, plus `ExternalExitError`
    /// carrying the captured stderr.
    pub async fn run_checked(self) -> RepoResult<ProcessOutput> {
        self.run_checked_with_cancellation(CancellationToken::new())
            .await
    }

    /// Runs the process with cancellation and validates the exit code.
    ///
    /// # Errors
    ///
    /// As [`run_checked`](Self::run_checked); an interrupted process is
    /// reported as `RepoError::Cancelled`.
    pub async fn run_checked_with_cancellation(
        self,
        token: CancellationToken,
    ) -> RepoResult<ProcessOutput> {
        let cmd_line = self.command_line();
        let quiet = self.process_flags().contains(ProcessFlags::QUIET_FAILURE);
        let success_codes = self.success_code_set().clone();

        let output = self.run_with_cancellation(token).await?;
        if output.is_interrupted() {
            return Err(RepoError::Cancelled);
        }

        if !success_codes.contains(&output.exit_code()) {
            let stderr = bytes_to_utf8(Encoding::Utf8, output.stderr()).into_owned();
            if !quiet && !stderr.trim().is_empty() {
                error!(cmd = %cmd_line, stderr = %stderr.trim_end(), "process error output");
            }
            return Err(ExternalExitError {
                command: cmd_line,
                code: output.exit_code(),
                stderr,
            }
            .into());
        }

        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        for key in self.env_removed() {
            command.env_remove(key);
        }
        for (key, value) in self.env_vars() {
            command.env(key, value);
        }

        if self.stdin_content().is_some() {
            command.stdin(Stdio::piped());
        } else {
            command.stdin(Stdio::null());
        }
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        // Dropping the future must not leak the child
        command.kill_on_drop(true);

        command
    }

    fn spawn(&self, command: &mut Command) -> RepoResult<Child> {
        command.spawn().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LaunchError::ExecutableNotFound {
                    name: self.program().display().to_string(),
                }
                .into()
            } else {
                LaunchError::SpawnFailed {
                    command: self.command_line(),
                    source,
                }
                .into()
            }
        })
    }
}
