// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only git queries.
//!
//! ```text
//! version()          git --version
//! show_toplevel()    git rev-parse --show-toplevel
//! for_each_ref()     git for-each-ref --format=... refs/heads refs/remotes refs/tags
//! remote_config()    git config -z --get-regexp ^remote\.
//! gitmodules()       git config -z -f .gitmodules --get-regexp ^submodule\.
//! status()           git status --porcelain -z --untracked-files=all
//! full_ref_name()    git rev-parse --verify --symbolic-full-name <ref>
//! reflog()           git reflog show --format=%H%x00%gs <ref> --
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use super::GitCli;
use super::parse::{
    ConfigEntry, FOR_EACH_REF_FORMAT, GitVersion, REFLOG_FORMAT, RefRecord, parse_config_entries,
    parse_for_each_ref, parse_reflog, parse_status,
};
use crate::error::{ConfigError, ExternalExitError, RepoResult};
use crate::model::{ReflogRecordData, TreeItemData};
use crate::refs::ReferenceKinds;

/// `git config --get-regexp` exits with 1 when nothing matches.
const CONFIG_NO_MATCH: i32 = 1;

impl GitCli {
    /// Installed git version.
    ///
    /// # Errors
    ///
    /// Launch failures, or `ParseError` for unrecognized output.
    pub async fn version(&self) -> RepoResult<GitVersion> {
        let text = self.text(["--version"]).await?;
        GitVersion::parse(&text)
    }

    /// Root of the work tree containing the configured directory.
    ///
    /// # Errors
    ///
    /// `ConfigError::NotARepository` if the directory is outside a work tree.
    pub async fn show_toplevel(&self) -> RepoResult<PathBuf> {
        let output = self
            .run(["rev-parse", "--show-toplevel"], &CancellationToken::new())
            .await?;
        let text = self.decode(output.stdout());
        let top = text.trim();
        if !output.success() || top.is_empty() {
            return Err(ConfigError::NotARepository(self.work_dir().display().to_string()).into());
        }
        Ok(PathBuf::from(top))
    }

    /// Every reference of the given kinds, in name order.
    ///
    /// # Errors
    ///
    /// Git failures or `ParseError`.
    pub async fn for_each_ref(&self, kinds: ReferenceKinds) -> RepoResult<Vec<RefRecord>> {
        if kinds.is_empty() {
            return Ok(Vec::new());
        }
        let mut args = vec!["for-each-ref", FOR_EACH_REF_FORMAT];
        args.extend(kinds.patterns());
        let text = self.text(args).await?;
        parse_for_each_ref(&text)
    }

    /// `remote.*` configuration entries.
    ///
    /// # Errors
    ///
    /// Git failures or `ParseError`.
    pub async fn remote_config(&self) -> RepoResult<Vec<ConfigEntry>> {
        self.config_regexp(&["config", "-z", "--get-regexp", r"^remote\."])
            .await
    }

    /// `submodule.*` entries of `.gitmodules`; empty if the file is absent.
    ///
    /// # Errors
    ///
    /// Git failures or `ParseError`.
    pub async fn gitmodules(&self) -> RepoResult<Vec<ConfigEntry>> {
        if !self.work_dir().join(".gitmodules").is_file() {
            return Ok(Vec::new());
        }
        self.config_regexp(&[
            "config",
            "-z",
            "-f",
            ".gitmodules",
            "--get-regexp",
            r"^submodule\.",
        ])
        .await
    }

    async fn config_regexp(&self, args: &[&str]) -> RepoResult<Vec<ConfigEntry>> {
        let output = self.run(args, &CancellationToken::new()).await?;
        match output.exit_code() {
            0 => parse_config_entries(&self.decode(output.stdout())),
            CONFIG_NO_MATCH if output.stderr().is_empty() => Ok(Vec::new()),
            code => Err(ExternalExitError {
                command: format!("git {}", args.join(" ")),
                code,
                stderr: self.decode(output.stderr()),
            }
            .into()),
        }
    }

    /// Changed, untracked and conflicted paths.
    ///
    /// # Errors
    ///
    /// Git failures or `ParseError`.
    pub async fn status(&self) -> RepoResult<BTreeMap<String, TreeItemData>> {
        let text = self
            .text(["status", "--porcelain", "-z", "--untracked-files=all"])
            .await?;
        parse_status(&text)
    }

    /// Full name of `reference`: `main` becomes `refs/heads/main`.
    ///
    /// `HEAD` stays `HEAD`; a plain object id is returned unchanged.
    ///
    /// # Errors
    ///
    /// `ExternalExitError` for an unknown or ambiguous reference.
    pub async fn full_ref_name(&self, reference: &str) -> RepoResult<String> {
        let text = self
            .text(["rev-parse", "--verify", "--symbolic-full-name", reference])
            .await?;
        let full_name = text.trim();
        if full_name.is_empty() {
            return Ok(reference.to_string());
        }
        Ok(full_name.to_string())
    }

    /// Reflog of `reference`, newest first.
    ///
    /// # Errors
    ///
    /// Git failures (e.g. unknown reference) or `ParseError`.
    pub async fn reflog(&self, reference: &str) -> RepoResult<Vec<ReflogRecordData>> {
        let text = self
            .text(["reflog", "show", REFLOG_FORMAT, reference, "--"])
            .await?;
        parse_reflog(&text)
    }
}
