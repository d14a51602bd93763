// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Invocation gateway: async process spawning with captured output.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .stdin() .timeout() .flags()
//!   .run() / .run_with_cancellation(token)
//!       --> tokio::process::Command
//!           stdout/stderr drained to bytes
//!       --> ProcessOutput { exit_code, stdout, stderr, interrupted }
//!   .run_checked()
//!       --> non-success exit code becomes ExternalExitError
//! ```
//!
//! A process that cannot be started is a `LaunchError`. A non-zero exit
//! code is data, not an error, unless the caller asks for `run_checked`.
//! Output is never decoded here.

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;

use std::path::Path;

pub use builder::{ProcessBuilder, ProcessFlags, ProcessOutput};

use crate::error::RepoResult;

/// Runs `program` with `args` in `cwd`, feeding `stdin` if given.
///
/// Thin wrapper over [`ProcessBuilder`] for one-off invocations.
///
/// # Errors
///
/// Returns `LaunchError` if the program cannot be started and
/// `ProcessError` if waiting on it fails.
pub async fn execute<I, S>(
    program: impl AsRef<Path>,
    args: I,
    cwd: impl AsRef<Path>,
    stdin: Option<Vec<u8>>,
) -> RepoResult<ProcessOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let mut builder = ProcessBuilder::new(program).args(args).cwd(cwd);
    if let Some(input) = stdin {
        builder = builder.stdin(input);
    }
    builder.run().await
}
