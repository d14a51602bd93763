// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Submodule lookup, creation and update.

use std::sync::Arc;

use super::Repository;
use crate::cache::DomainObject;
use crate::core::operation::{OperationHandle, OperationOutcome, OperationRunner, ProgressMonitor};
use crate::error::{RepoResult, StateError};
use crate::model::Submodule;
use crate::notify::RepositoryNotifications;

impl Repository {
    #[must_use]
    pub fn submodule_by_path(&self, path: &str) -> Option<Arc<Submodule>> {
        self.submodules().find(|submodule| submodule.has_path(path))
    }

    #[must_use]
    pub fn submodule_by_url(&self, url: &str) -> Option<Arc<Submodule>> {
        self.submodules().find(|submodule| submodule.has_url(url))
    }

    /// Adds a submodule at `path` cloned from `url`.
    ///
    /// Work tree and submodule notifications are held until both
    /// collections are refreshed, then fire once each.
    ///
    /// # Errors
    ///
    /// `StateError::AlreadyExists` if a submodule already uses `path`, git
    /// failures.
    pub async fn add_submodule(
        &self,
        path: &str,
        url: &str,
        branch: Option<&str>,
    ) -> RepoResult<Arc<Submodule>> {
        if self.submodule_by_path(path).is_some() {
            return Err(StateError::AlreadyExists {
                kind: Submodule::KIND,
                name: path.to_string(),
            }
            .into());
        }

        let _gate = self.monitor().block_notifications(
            RepositoryNotifications::WORKTREE_UPDATED | RepositoryNotifications::SUBMODULES_CHANGED,
        );
        let added = self.git().submodule_add(url, path, branch).await;
        self.refresh_status().await?;
        added?;
        self.refresh_submodules().await?;

        self.submodule_by_path(path).ok_or_else(|| {
            StateError::NotFound {
                kind: Submodule::KIND,
                name: path.to_string(),
            }
            .into()
        })
    }

    /// Initializes and updates all submodules recursively.
    ///
    /// # Errors
    ///
    /// Git failures, `Cancelled` if interrupted.
    pub async fn update_submodules(&self) -> RepoResult<()> {
        self.update_submodules_with(&ProgressMonitor::detached("update submodules"))
            .await
    }

    /// Starts [`update_submodules`](Self::update_submodules) as an operation.
    pub fn update_submodules_async<C>(
        &self,
        runner: &OperationRunner,
        on_completed: C,
    ) -> OperationHandle
    where
        C: FnOnce(OperationOutcome<()>) + Send + 'static,
    {
        runner.start(
            "update submodules",
            self.clone(),
            |repo, monitor| async move { repo.update_submodules_with(&monitor).await },
            on_completed,
        )
    }

    async fn update_submodules_with(&self, monitor: &ProgressMonitor) -> RepoResult<()> {
        monitor.ensure_not_cancelled()?;
        {
            let _gate = self.monitor().block_notifications(
                RepositoryNotifications::WORKTREE_UPDATED
                    | RepositoryNotifications::SUBMODULES_CHANGED,
            );
            monitor.set_action("updating submodules");
            self.git()
                .submodule_update(&monitor.cancellation_token())
                .await?;
        }
        monitor.set_action("refreshing status");
        self.refresh_submodules().await?;
        self.refresh_status().await?;
        monitor.report_progress(1.0);
        Ok(())
    }
}
