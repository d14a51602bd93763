// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Domain objects mirrored from git.
//!
//! ```text
//! entity         key                  raw data (compared on reconcile)
//! Branch         main                 BranchData
//! RemoteBranch   origin/main          RemoteBranchData
//! Tag            v1.0                 TagData
//! Remote         origin               RemoteData
//! Submodule      libs/core (name)     SubmoduleData
//! ReflogRecord   refs/heads/main@{0}  ReflogRecordData
//! TreeItem       src/lib.rs (path)    TreeItemData
//! ```
//!
//! Every entity is a newtype around [`ObjectCell`](crate::cache::ObjectCell);
//! accessors read the current fields, so a held `Arc` always sees the state
//! of the last reconciliation.

mod branch;
mod reflog;
mod remote;
mod submodule;
mod tag;
mod tree;
#[cfg(test)]
mod tests;

pub use branch::{Branch, BranchData, RemoteBranch, RemoteBranchData};
pub use reflog::{ReflogRecord, ReflogRecordData};
pub use remote::{Remote, RemoteData, TagFetchMode};
pub use submodule::{Submodule, SubmoduleData};
pub use tag::{Tag, TagData};
pub use tree::{FileStatus, TreeItem, TreeItemData};
