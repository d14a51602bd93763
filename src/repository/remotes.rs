// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote traffic and remote management.
//!
//! ```text
//!          capture   gate                        refresh   diff
//! fetch    R|T       REMOTE_BRANCH|TAG           R|T       yes
//! pull     L|R|T     REFERENCES                  L|R|T     yes (refresh also on failure)
//! push     -         REMOTE_BRANCH               R         no, per-ref results
//! prune    R         REMOTE_BRANCH               R         yes
//! ```
//!
//! Each has an awaited form and an `*_async` form that runs through an
//! [`OperationRunner`] and reports to a completion callback. With
//! `operations.serialize_mutations` the four run one at a time per
//! repository.

use std::sync::Arc;

use tracing::{info, warn};

use super::Repository;
use crate::cache::DomainObject;
use crate::core::operation::{OperationHandle, OperationOutcome, OperationRunner, ProgressMonitor};
use crate::error::{RepoResult, StateError};
use crate::git::{PushOptions, PushResult};
use crate::model::{Branch, Remote};
use crate::notify::RepositoryNotifications;
use crate::refs::{ReferenceChange, ReferenceKinds, Snapshot, diff};

/// Observer of completed remote operations. Every method defaults to a no-op.
pub trait RemoteOperationListener: Send + Sync {
    fn on_fetch_completed(&self, _remote: &Arc<Remote>, _changes: &[ReferenceChange]) {}

    fn on_pull_completed(&self, _remote: &Arc<Remote>, _changes: &[ReferenceChange]) {}

    fn on_prune_completed(&self, _remote: &Arc<Remote>, _changes: &[ReferenceChange]) {}
}

impl Repository {
    // --- fetch ---

    /// Downloads objects and references from `remote`.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote, git failures, parse
    /// failures of the refreshed references.
    pub async fn fetch(&self, remote: &Arc<Remote>) -> RepoResult<Vec<ReferenceChange>> {
        let monitor = ProgressMonitor::detached(format!("fetch {}", remote.name()));
        self.fetch_with(remote, &monitor).await
    }

    /// Starts [`fetch`](Self::fetch) as an operation.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote, before anything starts.
    pub fn fetch_async<C>(
        &self,
        runner: &OperationRunner,
        remote: &Arc<Remote>,
        on_completed: C,
    ) -> RepoResult<OperationHandle>
    where
        C: FnOnce(OperationOutcome<Vec<ReferenceChange>>) + Send + 'static,
    {
        remote.ensure_alive()?;
        Ok(runner.start(
            format!("fetch {}", remote.name()),
            (self.clone(), Arc::clone(remote)),
            |(repo, remote), monitor| async move { repo.fetch_with(&remote, &monitor).await },
            on_completed,
        ))
    }

    async fn fetch_with(
        &self,
        remote: &Arc<Remote>,
        monitor: &ProgressMonitor,
    ) -> RepoResult<Vec<ReferenceChange>> {
        remote.ensure_alive()?;
        let name = remote.name();
        let _slot = self.serialize_mutation().await;
        monitor.ensure_not_cancelled()?;

        let kinds = ReferenceKinds::REMOTE_BRANCH | ReferenceKinds::TAG;
        let before = Snapshot::capture(self.git(), kinds).await?;
        {
            let _gate = self.monitor().block_notifications(
                RepositoryNotifications::REMOTE_BRANCH_CHANGED
                    | RepositoryNotifications::TAG_CHANGED,
            );
            monitor.set_action(format!("fetching from {name}"));
            self.git()
                .fetch(&name, &monitor.cancellation_token())
                .await?;
        }

        monitor.set_action("refreshing references");
        let after = self.reload_refs(kinds).await?;
        let changes = diff(&before, &after);
        Self::log_changes("fetch", &name, &changes);
        self.dispatch_remote(|listener| listener.on_fetch_completed(remote, &changes));
        monitor.report_progress(1.0);
        Ok(changes)
    }

    // --- pull ---

    /// Fetches from `remote` and merges into the current branch.
    ///
    /// References and status are refreshed even when the pull fails; the
    /// pull's error is returned afterwards.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote, git failures (merge
    /// conflicts included), parse failures of the refreshed state.
    pub async fn pull(&self, remote: &Arc<Remote>) -> RepoResult<Vec<ReferenceChange>> {
        let monitor = ProgressMonitor::detached(format!("pull {}", remote.name()));
        self.pull_with(remote, &monitor).await
    }

    /// Starts [`pull`](Self::pull) as an operation.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote, before anything starts.
    pub fn pull_async<C>(
        &self,
        runner: &OperationRunner,
        remote: &Arc<Remote>,
        on_completed: C,
    ) -> RepoResult<OperationHandle>
    where
        C: FnOnce(OperationOutcome<Vec<ReferenceChange>>) + Send + 'static,
    {
        remote.ensure_alive()?;
        Ok(runner.start(
            format!("pull {}", remote.name()),
            (self.clone(), Arc::clone(remote)),
            |(repo, remote), monitor| async move { repo.pull_with(&remote, &monitor).await },
            on_completed,
        ))
    }

    async fn pull_with(
        &self,
        remote: &Arc<Remote>,
        monitor: &ProgressMonitor,
    ) -> RepoResult<Vec<ReferenceChange>> {
        remote.ensure_alive()?;
        let name = remote.name();
        let _slot = self.serialize_mutation().await;
        monitor.ensure_not_cancelled()?;

        let kinds = ReferenceKinds::all();
        let before = Snapshot::capture(self.git(), kinds).await?;
        let pulled = {
            let _gate = self
                .monitor()
                .block_notifications(RepositoryNotifications::REFERENCES);
            monitor.set_action(format!("pulling from {name}"));
            self.git().pull(&name, &monitor.cancellation_token()).await
        };

        monitor.set_action("refreshing references");
        let refreshed = self.reload_refs(kinds).await;
        let status = self.refresh_status().await;
        if let Err(err) = pulled {
            for failure in [refreshed.err(), status.err()].into_iter().flatten() {
                warn!(remote = %name, error = %failure, "refresh after failed pull");
            }
            return Err(err);
        }
        let after = refreshed?;
        status?;

        let changes = diff(&before, &after);
        Self::log_changes("pull", &name, &changes);
        self.dispatch_remote(|listener| listener.on_pull_completed(remote, &changes));
        monitor.report_progress(1.0);
        Ok(changes)
    }

    // --- push ---

    /// Pushes `branches` to `remote`.
    ///
    /// Remote branches are refreshed only when some reference was actually
    /// updated on the remote.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote or branch,
    /// `StateError::Inappropriate` for an empty branch list, git failures
    /// that report no reference.
    pub async fn push(
        &self,
        remote: &Arc<Remote>,
        branches: &[Arc<Branch>],
        options: PushOptions,
    ) -> RepoResult<Vec<PushResult>> {
        let monitor = ProgressMonitor::detached(format!("push {}", remote.name()));
        self.push_with(remote, branches, options, &monitor).await
    }

    /// Starts [`push`](Self::push) as an operation.
    ///
    /// # Errors
    ///
    /// The argument errors of [`push`](Self::push), before anything starts.
    pub fn push_async<C>(
        &self,
        runner: &OperationRunner,
        remote: &Arc<Remote>,
        branches: Vec<Arc<Branch>>,
        options: PushOptions,
        on_completed: C,
    ) -> RepoResult<OperationHandle>
    where
        C: FnOnce(OperationOutcome<Vec<PushResult>>) + Send + 'static,
    {
        check_push_arguments(remote, &branches)?;
        Ok(runner.start(
            format!("push {}", remote.name()),
            (self.clone(), Arc::clone(remote), branches),
            move |(repo, remote, branches), monitor| async move {
                repo.push_with(&remote, &branches, options, &monitor).await
            },
            on_completed,
        ))
    }

    async fn push_with(
        &self,
        remote: &Arc<Remote>,
        branches: &[Arc<Branch>],
        options: PushOptions,
        monitor: &ProgressMonitor,
    ) -> RepoResult<Vec<PushResult>> {
        let refs = check_push_arguments(remote, branches)?;
        let name = remote.name();
        let _slot = self.serialize_mutation().await;
        monitor.ensure_not_cancelled()?;

        let results = {
            let _gate = self
                .monitor()
                .block_notifications(RepositoryNotifications::REMOTE_BRANCH_CHANGED);
            monitor.set_action(format!("pushing to {name}"));
            self.git()
                .push(&name, &refs, options, &monitor.cancellation_token())
                .await?
        };

        if results.iter().any(|result| result.kind.changed_remote()) {
            monitor.set_action("refreshing references");
            self.refresh_refs(ReferenceKinds::REMOTE_BRANCH).await?;
        }
        info!(
            remote = %name,
            pushed = results.iter().filter(|r| r.kind.changed_remote()).count(),
            total = results.len(),
            "push finished"
        );
        monitor.report_progress(1.0);
        Ok(results)
    }

    // --- prune ---

    /// Deletes remote-tracking branches whose remote branch is gone.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote, git failures.
    pub async fn prune(&self, remote: &Arc<Remote>) -> RepoResult<Vec<ReferenceChange>> {
        let monitor = ProgressMonitor::detached(format!("prune {}", remote.name()));
        self.prune_with(remote, &monitor).await
    }

    /// Starts [`prune`](Self::prune) as an operation.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote, before anything starts.
    pub fn prune_async<C>(
        &self,
        runner: &OperationRunner,
        remote: &Arc<Remote>,
        on_completed: C,
    ) -> RepoResult<OperationHandle>
    where
        C: FnOnce(OperationOutcome<Vec<ReferenceChange>>) + Send + 'static,
    {
        remote.ensure_alive()?;
        Ok(runner.start(
            format!("prune {}", remote.name()),
            (self.clone(), Arc::clone(remote)),
            |(repo, remote), monitor| async move { repo.prune_with(&remote, &monitor).await },
            on_completed,
        ))
    }

    async fn prune_with(
        &self,
        remote: &Arc<Remote>,
        monitor: &ProgressMonitor,
    ) -> RepoResult<Vec<ReferenceChange>> {
        remote.ensure_alive()?;
        let name = remote.name();
        let _slot = self.serialize_mutation().await;
        monitor.ensure_not_cancelled()?;

        let kinds = ReferenceKinds::REMOTE_BRANCH;
        let before = Snapshot::capture(self.git(), kinds).await?;
        {
            let _gate = self
                .monitor()
                .block_notifications(RepositoryNotifications::REMOTE_BRANCH_CHANGED);
            monitor.set_action(format!("searching stale branches of {name}"));
            self.git()
                .prune_remote(&name, &monitor.cancellation_token())
                .await?;
        }

        let after = self.reload_refs(kinds).await?;
        let changes = diff(&before, &after);
        Self::log_changes("prune", &name, &changes);
        self.dispatch_remote(|listener| listener.on_prune_completed(remote, &changes));
        monitor.report_progress(1.0);
        Ok(changes)
    }

    // --- management ---

    /// Adds a remote and returns its object.
    ///
    /// # Errors
    ///
    /// `StateError::AlreadyExists` if the name is taken, git failures.
    pub async fn add_remote(&self, name: &str, url: &str) -> RepoResult<Arc<Remote>> {
        if self.remotes().contains(name) {
            return Err(StateError::AlreadyExists {
                kind: Remote::KIND,
                name: name.to_string(),
            }
            .into());
        }
        self.git().add_remote(name, url).await?;
        self.refresh_remotes().await?;
        self.remotes().get(name).ok_or_else(|| {
            StateError::NotFound {
                kind: Remote::KIND,
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Removes a remote along with its remote-tracking branches.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote, git failures.
    pub async fn remove_remote(&self, remote: &Arc<Remote>) -> RepoResult<()> {
        remote.ensure_alive()?;
        let name = remote.name();
        self.git().remove_remote(&name).await?;
        self.remotes().remove(&name);
        self.refresh_refs(ReferenceKinds::REMOTE_BRANCH).await
    }

    /// Renames a remote in place: the same object moves to the new key.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote,
    /// `StateError::AlreadyExists` if `new_name` is taken, git failures.
    pub async fn rename_remote(&self, remote: &Arc<Remote>, new_name: &str) -> RepoResult<()> {
        remote.ensure_alive()?;
        if self.remotes().contains(new_name) {
            return Err(StateError::AlreadyExists {
                kind: Remote::KIND,
                name: new_name.to_string(),
            }
            .into());
        }
        let old_name = remote.name();
        self.git().rename_remote(&old_name, new_name).await?;
        self.remotes().rename(&old_name, new_name)?;
        // git rewrites the default refspec and moves the tracking branches
        self.refresh_remotes().await?;
        self.refresh_refs(ReferenceKinds::REMOTE_BRANCH).await
    }

    /// Sets the fetch URL.
    ///
    /// Without an explicit push URL git pushes to the fetch URL, so the push
    /// URL follows; an explicit push URL is left alone.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote, git failures.
    pub async fn set_remote_fetch_url(&self, remote: &Arc<Remote>, url: &str) -> RepoResult<()> {
        remote.ensure_alive()?;
        self.git().set_remote_url(&remote.name(), url, false).await?;
        self.refresh_remotes().await
    }

    /// Sets an explicit push URL.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted remote, git failures.
    pub async fn set_remote_push_url(&self, remote: &Arc<Remote>, url: &str) -> RepoResult<()> {
        remote.ensure_alive()?;
        self.git().set_remote_url(&remote.name(), url, true).await?;
        self.refresh_remotes().await
    }
}

fn check_push_arguments(remote: &Arc<Remote>, branches: &[Arc<Branch>]) -> RepoResult<Vec<String>> {
    remote.ensure_alive()?;
    if branches.is_empty() {
        return Err(StateError::Inappropriate {
            action: "push",
            name: remote.name(),
            reason: "at least one branch is required".to_string(),
        }
        .into());
    }
    branches
        .iter()
        .map(|branch| {
            branch.ensure_alive()?;
            Ok(branch.name())
        })
        .collect()
}
