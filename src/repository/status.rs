// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Index and work tree operations on status entries.

use std::sync::Arc;

use super::Repository;
use crate::cache::DomainObject;
use crate::error::{RepoResult, StateError};
use crate::model::TreeItem;
use crate::notify::RepositoryNotifications;

fn ensure_all_alive(items: &[Arc<TreeItem>]) -> RepoResult<()> {
    items.iter().try_for_each(|item| item.ensure_alive())
}

impl Repository {
    /// Stages the content of `items`, deletions included.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted item, git failures.
    pub async fn stage(&self, items: &[Arc<TreeItem>]) -> RepoResult<()> {
        ensure_all_alive(items)?;
        self.git().add_paths(&Self::paths_of(items)).await?;
        self.index_changed().await
    }

    /// Resets the index entries of `items` to `HEAD`.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted item, git failures.
    pub async fn unstage(&self, items: &[Arc<TreeItem>]) -> RepoResult<()> {
        ensure_all_alive(items)?;
        self.git().reset_paths(&Self::paths_of(items)).await?;
        self.index_changed().await
    }

    /// Discards unstaged modifications and deletions of `items`.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted item,
    /// `StateError::Inappropriate` for an item without a revertible
    /// unstaged change, git failures.
    pub async fn revert(&self, items: &[Arc<TreeItem>]) -> RepoResult<()> {
        ensure_all_alive(items)?;
        if let Some(item) = items.iter().find(|item| !item.is_revertible()) {
            return Err(StateError::Inappropriate {
                action: "revert",
                name: item.path(),
                reason: format!("status '{}' has no unstaged change to revert", item.status_code()),
            }
            .into());
        }
        self.git().checkout_paths(&Self::paths_of(items)).await?;
        self.refresh_status().await
    }

    /// Removes the file of `item` from index and work tree.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted item, git failures (local
    /// modifications without `force`).
    pub async fn remove_item(&self, item: &Arc<TreeItem>, force: bool) -> RepoResult<()> {
        item.ensure_alive()?;
        self.git().remove_paths(&[item.path()], force).await?;
        self.index_changed().await
    }

    /// Sets or clears the assume-unchanged bit of tracked `items`.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted item, git failures.
    pub async fn set_assume_unchanged(&self, items: &[Arc<TreeItem>], value: bool) -> RepoResult<()> {
        ensure_all_alive(items)?;
        self.git()
            .set_assume_unchanged(&Self::paths_of(items), value)
            .await?;
        self.index_changed().await
    }

    async fn index_changed(&self) -> RepoResult<()> {
        self.monitor().notify(RepositoryNotifications::INDEX_UPDATED);
        self.refresh_status().await
    }
}
