// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local and remote-tracking branches.

use crate::cache::{ObjectCell, domain_object};
use crate::refs::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchData {
    pub target: ObjectId,
    /// Full name of the upstream, e.g. `refs/remotes/origin/main`.
    pub upstream: Option<String>,
    /// HEAD points at this branch.
    pub is_current: bool,
}

/// Branch under `refs/heads/`, keyed by its short name.
pub struct Branch(ObjectCell<BranchData>);

domain_object!(Branch, BranchData, "branch");

impl Branch {
    #[must_use]
    pub fn target(&self) -> ObjectId {
        self.0.with(|data| data.target.clone())
    }

    #[must_use]
    pub fn upstream(&self) -> Option<String> {
        self.0.with(|data| data.upstream.clone())
    }

    #[must_use]
    pub fn is_current(&self) -> bool {
        self.0.with(|data| data.is_current)
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("refs/heads/{}", self.0.lifetime().name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBranchData {
    pub target: ObjectId,
}

/// Branch under `refs/remotes/`, keyed as `remote/branch`.
pub struct RemoteBranch(ObjectCell<RemoteBranchData>);

domain_object!(RemoteBranch, RemoteBranchData, "remote branch");

impl RemoteBranch {
    #[must_use]
    pub fn target(&self) -> ObjectId {
        self.0.with(|data| data.target.clone())
    }

    /// Name of the remote this branch tracks.
    #[must_use]
    pub fn remote_name(&self) -> String {
        let name = self.0.lifetime().name();
        name.split_once('/')
            .map_or_else(|| name.clone(), |(remote, _)| remote.to_string())
    }

    /// Branch name on the remote side.
    #[must_use]
    pub fn branch_name(&self) -> String {
        let name = self.0.lifetime().name();
        name.split_once('/')
            .map_or_else(|| name.clone(), |(_, branch)| branch.to_string())
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("refs/remotes/{}", self.0.lifetime().name())
    }
}
