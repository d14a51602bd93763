// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git commands that change repository state.
//!
//! ```text
//! remote traffic   fetch, pull, push --porcelain, remote prune
//! remotes          remote add/remove/rename, remote set-url [--push]
//! references       branch, branch -d/-D, branch -m, tag [-a], tag -d
//! index/worktree   add, reset, checkout --, rm, update-index
//! submodules       submodule add, submodule update --init --recursive
//! ```
//!
//! Long-running commands take the operation's cancellation token. Paths are
//! always passed after `--`.

use bon::Builder;
use tokio_util::sync::CancellationToken;

use super::GitCli;
use super::parse::{PushResult, parse_push_output};
use crate::error::{ExternalExitError, RepoResult};

/// Flags of `git push`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct PushOptions {
    /// `--force`
    #[builder(default)]
    pub force: bool,
    /// `--thin` (default) or `--no-thin`
    #[builder(default = true)]
    pub thin_pack: bool,
    /// `--tags`
    #[builder(default)]
    pub tags: bool,
}

impl Default for PushOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GitCli {
    // --- remote traffic ---

    /// # Errors
    ///
    /// `ExternalExitError` if git fails, `Cancelled` if interrupted.
    pub async fn fetch(&self, remote: &str, token: &CancellationToken) -> RepoResult<()> {
        self.run_checked(["fetch", remote], token).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// `ExternalExitError` if git fails (conflicts included).
    pub async fn pull(&self, remote: &str, token: &CancellationToken) -> RepoResult<()> {
        self.run_checked(["pull", remote], token).await?;
        Ok(())
    }

    /// Pushes `refs` and reports the outcome of each reference.
    ///
    /// A rejected reference makes git exit non-zero; that is reported in the
    /// results, not as an error.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` if git fails without reporting any reference.
    pub async fn push(
        &self,
        remote: &str,
        refs: &[String],
        options: PushOptions,
        token: &CancellationToken,
    ) -> RepoResult<Vec<PushResult>> {
        let mut args = vec!["push".to_string(), "--porcelain".to_string()];
        if options.force {
            args.push("--force".to_string());
        }
        args.push(if options.thin_pack { "--thin" } else { "--no-thin" }.to_string());
        if options.tags {
            args.push("--tags".to_string());
        }
        args.push(remote.to_string());
        args.extend(refs.iter().cloned());

        let command = self.command(&args);
        let command_line = command.command_line();
        let output = command.run_with_cancellation(token.clone()).await?;
        if output.is_interrupted() {
            return Err(crate::error::RepoError::Cancelled);
        }

        let results = parse_push_output(&self.decode(output.stdout()))?;
        if !output.success() && results.is_empty() {
            return Err(ExternalExitError {
                command: command_line,
                code: output.exit_code(),
                stderr: self.decode(output.stderr()),
            }
            .into());
        }
        Ok(results)
    }

    /// Deletes stale remote-tracking branches of `remote`.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn prune_remote(&self, remote: &str, token: &CancellationToken) -> RepoResult<()> {
        self.run_checked(["remote", "prune", remote], token).await?;
        Ok(())
    }

    // --- remotes ---

    /// # Errors
    ///
    /// `ExternalExitError` if git fails (e.g. the name is taken).
    pub async fn add_remote(&self, name: &str, url: &str) -> RepoResult<()> {
        self.text(["remote", "add", name, url]).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn remove_remote(&self, name: &str) -> RepoResult<()> {
        self.text(["remote", "remove", name]).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn rename_remote(&self, old_name: &str, new_name: &str) -> RepoResult<()> {
        self.text(["remote", "rename", old_name, new_name]).await?;
        Ok(())
    }

    /// Sets `remote.<name>.url`, or `remote.<name>.pushurl` with `push`.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn set_remote_url(&self, name: &str, url: &str, push: bool) -> RepoResult<()> {
        if push {
            self.text(["remote", "set-url", "--push", name, url]).await?;
        } else {
            self.text(["remote", "set-url", name, url]).await?;
        }
        Ok(())
    }

    // --- references ---

    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn create_branch(&self, name: &str, start_point: &str) -> RepoResult<()> {
        self.text(["branch", name, start_point]).await?;
        Ok(())
    }

    /// `-d`, or `-D` with `force`.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` if git fails (e.g. unmerged without `force`).
    pub async fn delete_branch(&self, name: &str, force: bool) -> RepoResult<()> {
        let flag = if force { "-D" } else { "-d" };
        self.text(["branch", flag, name]).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn rename_branch(&self, old_name: &str, new_name: &str) -> RepoResult<()> {
        self.text(["branch", "-m", old_name, new_name]).await?;
        Ok(())
    }

    /// Lightweight tag, or annotated when `message` is given.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn create_tag(
        &self,
        name: &str,
        target: &str,
        message: Option<&str>,
    ) -> RepoResult<()> {
        match message {
            Some(message) => self.text(["tag", "-a", "-m", message, name, target]).await?,
            None => self.text(["tag", name, target]).await?,
        };
        Ok(())
    }

    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn delete_tag(&self, name: &str) -> RepoResult<()> {
        self.text(["tag", "-d", name]).await?;
        Ok(())
    }

    // --- index and work tree ---

    async fn with_paths(&self, command: &[&str], paths: &[String]) -> RepoResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let args = command
            .iter()
            .map(|arg| (*arg).to_string())
            .chain(std::iter::once("--".to_string()))
            .chain(paths.iter().cloned());
        self.text(args).await?;
        Ok(())
    }

    /// Stages content, deletions included.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn add_paths(&self, paths: &[String]) -> RepoResult<()> {
        self.with_paths(&["add", "--all"], paths).await
    }

    /// Resets index entries to `HEAD`.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn reset_paths(&self, paths: &[String]) -> RepoResult<()> {
        self.with_paths(&["reset", "-q", "HEAD"], paths).await
    }

    /// Restores work tree files from the index.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn checkout_paths(&self, paths: &[String]) -> RepoResult<()> {
        self.with_paths(&["checkout"], paths).await
    }

    /// # Errors
    ///
    /// `ExternalExitError` if git fails (e.g. local changes without `force`).
    pub async fn remove_paths(&self, paths: &[String], force: bool) -> RepoResult<()> {
        if force {
            self.with_paths(&["rm", "-q", "-f"], paths).await
        } else {
            self.with_paths(&["rm", "-q"], paths).await
        }
    }

    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn set_assume_unchanged(&self, paths: &[String], value: bool) -> RepoResult<()> {
        let flag = if value {
            "--assume-unchanged"
        } else {
            "--no-assume-unchanged"
        };
        self.with_paths(&["update-index", flag], paths).await
    }

    // --- submodules ---

    /// # Errors
    ///
    /// `ExternalExitError` if git fails.
    pub async fn submodule_add(
        &self,
        url: &str,
        path: &str,
        branch: Option<&str>,
    ) -> RepoResult<()> {
        let mut args = vec!["submodule", "add", "--quiet"];
        if let Some(branch) = branch {
            args.extend(["-b", branch]);
        }
        args.extend(["--", url, path]);
        self.text(args).await?;
        Ok(())
    }

    /// Initializes and updates every submodule recursively.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` if git fails, `Cancelled` if interrupted.
    pub async fn submodule_update(&self, token: &CancellationToken) -> RepoResult<()> {
        self.run_checked(["submodule", "update", "--init", "--recursive"], token)
            .await?;
        Ok(())
    }
}
