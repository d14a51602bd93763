// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch and tag management.

use std::sync::Arc;

use super::Repository;
use crate::cache::{DomainObject, ObjectCollection};
use crate::error::{RepoResult, StateError};
use crate::model::{Branch, Tag};
use crate::refs::ReferenceKinds;

fn ensure_free<T: DomainObject>(collection: &ObjectCollection<T>, name: &str) -> RepoResult<()> {
    if collection.contains(name) {
        return Err(StateError::AlreadyExists {
            kind: T::KIND,
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}

fn created<T: DomainObject>(collection: &ObjectCollection<T>, name: &str) -> RepoResult<Arc<T>> {
    collection.get(name).ok_or_else(|| {
        StateError::NotFound {
            kind: T::KIND,
            name: name.to_string(),
        }
        .into()
    })
}

impl Repository {
    /// Creates branch `name` at `start_point` (any revision expression).
    ///
    /// # Errors
    ///
    /// `StateError::AlreadyExists` if the name is taken, git failures.
    pub async fn create_branch(&self, name: &str, start_point: &str) -> RepoResult<Arc<Branch>> {
        ensure_free(self.branches(), name)?;
        self.git().create_branch(name, start_point).await?;
        self.refresh_refs(ReferenceKinds::LOCAL_BRANCH).await?;
        created(self.branches(), name)
    }

    /// Deletes a branch; `force` also deletes unmerged branches.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted branch,
    /// `StateError::Inappropriate` for the checked out branch, git failures.
    pub async fn delete_branch(&self, branch: &Arc<Branch>, force: bool) -> RepoResult<()> {
        branch.ensure_alive()?;
        let name = branch.name();
        if branch.is_current() {
            return Err(StateError::Inappropriate {
                action: "delete",
                name,
                reason: "branch is checked out".to_string(),
            }
            .into());
        }
        let full_name = branch.full_name();
        self.git().delete_branch(&name, force).await?;
        self.branches().remove(&name);
        self.drop_reflog(&full_name);
        Ok(())
    }

    /// Renames a branch; the same object moves to the new key.
    ///
    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted branch,
    /// `StateError::AlreadyExists` if `new_name` is taken, git failures.
    pub async fn rename_branch(&self, branch: &Arc<Branch>, new_name: &str) -> RepoResult<()> {
        branch.ensure_alive()?;
        ensure_free(self.branches(), new_name)?;
        let old_name = branch.name();
        let old_full_name = branch.full_name();
        self.git().rename_branch(&old_name, new_name).await?;
        self.drop_reflog(&old_full_name);
        self.branches().rename(&old_name, new_name)?;
        self.refresh_refs(ReferenceKinds::LOCAL_BRANCH).await
    }

    /// Creates a tag at `target`; annotated when `message` is given.
    ///
    /// # Errors
    ///
    /// `StateError::AlreadyExists` if the name is taken, git failures.
    pub async fn create_tag(
        &self,
        name: &str,
        target: &str,
        message: Option<&str>,
    ) -> RepoResult<Arc<Tag>> {
        ensure_free(self.tags(), name)?;
        self.git().create_tag(name, target, message).await?;
        self.refresh_refs(ReferenceKinds::TAG).await?;
        created(self.tags(), name)
    }

    /// # Errors
    ///
    /// `StateError::Deleted` for a deleted tag, git failures.
    pub async fn delete_tag(&self, tag: &Arc<Tag>) -> RepoResult<()> {
        tag.ensure_alive()?;
        let name = tag.name();
        let full_name = tag.full_name();
        self.git().delete_tag(&name).await?;
        self.tags().remove(&name);
        self.drop_reflog(&full_name);
        Ok(())
    }
}
