// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolved git executable bound to one work tree.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::types::{GitConfig, OperationsConfig};
use crate::core::process::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{LaunchError, RepoResult};
use crate::utility::encoding::{Encoding, bytes_to_utf8};

/// Variables that keep git non-interactive and its output stable.
const BASE_ENV: [(&str, &str); 3] = [
    ("GIT_TERMINAL_PROMPT", "0"),
    ("GCM_INTERACTIVE", "never"),
    ("LC_ALL", "C"),
];

/// Invokes git in one work tree.
#[derive(Debug, Clone)]
pub struct GitCli {
    executable: PathBuf,
    work_dir: PathBuf,
    env: Vec<(String, String)>,
    timeout: Option<Duration>,
    encoding: Encoding,
    kill_on_cancel: bool,
}

impl GitCli {
    /// Resolves the executable and captures invocation settings.
    ///
    /// # Errors
    ///
    /// `LaunchError::ExecutableNotFound` if git cannot be found.
    pub fn new(
        work_dir: impl Into<PathBuf>,
        git: &GitConfig,
        operations: &OperationsConfig,
    ) -> RepoResult<Self> {
        let executable = resolve_executable(git.executable.as_deref())?;
        debug!(git = %executable.display(), "resolved git executable");

        let env = BASE_ENV
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .chain(git.env_pairs().map(|(k, v)| (k.to_string(), v.to_string())))
            .collect();

        Ok(Self {
            executable,
            work_dir: work_dir.into(),
            env,
            timeout: git.timeout(),
            encoding: git.output_encoding,
            kill_on_cancel: operations.kill_on_cancel,
        })
    }

    /// Same settings, different work tree.
    #[must_use]
    pub fn with_work_dir(&self, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    #[must_use]
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Prepared invocation; callers may add flags or stdin before running.
    pub fn command<I, S>(&self, args: I) -> ProcessBuilder
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut builder = ProcessBuilder::new(&self.executable)
            .name("git")
            .args(args)
            .cwd(&self.work_dir)
            .envs(self.env.iter().cloned())
            .maybe_timeout(self.timeout);
        if self.kill_on_cancel {
            builder = builder.flag(ProcessFlags::KILL_ON_CANCEL);
        }
        builder
    }

    /// Runs git; a failing exit code is returned, not raised.
    ///
    /// # Errors
    ///
    /// `LaunchError` or `ProcessError` from the gateway.
    pub async fn run<I, S>(&self, args: I, token: &CancellationToken) -> RepoResult<ProcessOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command(args).run_with_cancellation(token.clone()).await
    }

    /// Runs git and fails on a non-zero exit code.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` with git's stderr, plus everything [`run`](Self::run)
    /// returns. An interrupted run is `RepoError::Cancelled`.
    pub async fn run_checked<I, S>(
        &self,
        args: I,
        token: &CancellationToken,
    ) -> RepoResult<ProcessOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command(args)
            .run_checked_with_cancellation(token.clone())
            .await
    }

    /// Runs git checked and decodes stdout.
    ///
    /// # Errors
    ///
    /// As [`run_checked`](Self::run_checked).
    pub async fn text<I, S>(&self, args: I) -> RepoResult<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.run_checked(args, &CancellationToken::new()).await?;
        Ok(self.decode(output.stdout()))
    }

    /// Decodes bytes with the configured output encoding.
    #[must_use]
    pub fn decode(&self, bytes: &[u8]) -> String {
        bytes_to_utf8(self.encoding, bytes).into_owned()
    }
}

fn resolve_executable(configured: Option<&Path>) -> RepoResult<PathBuf> {
    let Some(path) = configured else {
        return which_git("git");
    };

    if path.components().count() > 1 || path.is_absolute() {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(LaunchError::ExecutableNotFound {
            name: path.display().to_string(),
        }
        .into());
    }
    which_git(&path.to_string_lossy())
}

fn which_git(name: &str) -> RepoResult<PathBuf> {
    which::which(name).map_err(|_| {
        LaunchError::ExecutableNotFound {
            name: name.to_string(),
        }
        .into()
    })
}
