// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `remotes`, `fetch`, `pull`, `push` and `prune` commands.

use std::sync::Arc;

use anyhow::bail;

use super::progress::{OnCompleted, run_operation};
use super::{lookup, print_lines};
use crate::cache::DomainObject;
use crate::cli::remote::{PushArgs, RemoteArgs};
use crate::core::operation::{OperationHandle, OperationRunner};
use crate::error::{RepoResult, Result};
use crate::git::{PushResult, PushResultType};
use crate::model::{Branch, Remote};
use crate::refs::{ReferenceChange, ReferenceKinds};
use crate::repository::Repository;

/// Remote operation that reports moved references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOperation {
    Fetch,
    Pull,
    Prune,
}

impl DiffOperation {
    const fn verb(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Pull => "pull",
            Self::Prune => "prune",
        }
    }

    fn start(
        self,
        repo: &Repository,
        runner: &OperationRunner,
        remote: &Arc<Remote>,
        done: OnCompleted<Vec<ReferenceChange>>,
    ) -> RepoResult<OperationHandle> {
        match self {
            Self::Fetch => repo.fetch_async(runner, remote, done),
            Self::Pull => repo.pull_async(runner, remote, done),
            Self::Prune => repo.prune_async(runner, remote, done),
        }
    }
}

/// Lists remotes like `git remote -v`.
///
/// # Errors
///
/// Returns an error if the remote configuration cannot be read.
pub async fn run_remotes_command(repo: &Repository) -> Result<()> {
    repo.refresh_remotes().await?;
    print_lines(&format_remotes(&repo.remotes().snapshot()));
    Ok(())
}

/// `name<TAB>url (fetch)` and `name<TAB>url (push)` per remote.
#[must_use]
pub fn format_remotes(remotes: &[Arc<Remote>]) -> Vec<String> {
    let mut lines = Vec::new();
    for remote in remotes {
        let name = remote.name();
        if let Some(url) = remote.fetch_url() {
            lines.push(format!("{name}\t{url} (fetch)"));
        }
        if let Some(url) = remote.push_url() {
            lines.push(format!("{name}\t{url} (push)"));
        }
    }
    lines
}

/// Runs fetch, pull or prune against the named remote and prints the
/// reference changes.
///
/// # Errors
///
/// Returns an error if the remote is unknown or the operation fails.
pub async fn run_diff_command(
    operation: DiffOperation,
    args: &RemoteArgs,
    repo: &Repository,
) -> Result<()> {
    repo.refresh_remotes().await?;
    repo.refresh_refs(ReferenceKinds::all()).await?;
    let remote = lookup(repo.remotes(), &args.remote)?;

    let changes =
        run_operation(|runner, done| operation.start(repo, runner, &remote, done)).await?;
    print_lines(&format_changes(operation.verb(), &args.remote, &changes));
    Ok(())
}

/// One line per change, or a single line saying nothing moved.
#[must_use]
pub fn format_changes(verb: &str, remote: &str, changes: &[ReferenceChange]) -> Vec<String> {
    if changes.is_empty() {
        return vec![format!("{verb} {remote}: no references changed")];
    }
    changes.iter().map(ToString::to_string).collect()
}

/// Pushes the named branches.
///
/// # Errors
///
/// Returns an error if the remote or a branch is unknown, the push fails,
/// or the remote rejected any reference.
pub async fn run_push_command(args: &PushArgs, repo: &Repository) -> Result<()> {
    repo.refresh_remotes().await?;
    repo.refresh_refs(ReferenceKinds::LOCAL_BRANCH | ReferenceKinds::REMOTE_BRANCH)
        .await?;
    let remote = lookup(repo.remotes(), &args.remote)?;
    let branches = args
        .branches
        .iter()
        .map(|name| lookup(repo.branches(), name))
        .collect::<RepoResult<Vec<Arc<Branch>>>>()?;

    let results = run_operation(|runner, done| {
        repo.push_async(runner, &remote, branches, args.options(), done)
    })
    .await?;
    print_lines(&format_push_results(&results));

    let rejected = results
        .iter()
        .filter(|result| result.kind == PushResultType::Rejected)
        .count();
    if rejected > 0 {
        bail!("{rejected} reference(s) rejected by '{}'", args.remote);
    }
    Ok(())
}

/// `flag from:to summary` per pushed reference.
#[must_use]
pub fn format_push_results(results: &[PushResult]) -> Vec<String> {
    results
        .iter()
        .map(|result| {
            format!(
                "{} {}:{} {}",
                result.kind.flag(),
                result.from,
                result.to,
                result.summary
            )
        })
        .collect()
}
