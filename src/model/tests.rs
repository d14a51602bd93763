// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::sync::Arc;

use super::*;
use crate::cache::{DomainObject, ObjectCollection};
use crate::error::ErrorKind;
use crate::refs::ObjectId;

#[test]
fn test_remote_branch_splits_name() {
    let branch = RemoteBranch::create(
        "origin/feature/x".into(),
        RemoteBranchData {
            target: ObjectId::new("a1"),
        },
    );
    assert_eq!(branch.remote_name(), "origin");
    assert_eq!(branch.branch_name(), "feature/x");
    assert_eq!(branch.full_name(), "refs/remotes/origin/feature/x");
}

#[test]
fn test_remote_push_url_falls_back_to_fetch_url() {
    let remote = Remote::create(
        "origin".into(),
        RemoteData {
            fetch_url: Some("https://example.com/a.git".into()),
            ..RemoteData::default()
        },
    );
    assert!(!remote.has_explicit_push_url());
    assert_eq!(remote.push_url().as_deref(), Some("https://example.com/a.git"));

    remote
        .update(RemoteData {
            fetch_url: Some("https://example.com/b.git".into()),
            ..RemoteData::default()
        })
        .expect("alive");
    assert_eq!(remote.push_url().as_deref(), Some("https://example.com/b.git"));
}

#[test]
fn test_tag_fetch_mode_from_config() {
    assert_eq!(TagFetchMode::from_config("--tags"), TagFetchMode::AllTags);
    assert_eq!(TagFetchMode::from_config("--no-tags"), TagFetchMode::NoTags);
    assert_eq!(TagFetchMode::from_config("anything"), TagFetchMode::Default);
}

#[test]
fn test_tree_item_status() {
    let item = TreeItem::create(
        "src/lib.rs".into(),
        TreeItemData {
            staged: FileStatus::Added,
            unstaged: FileStatus::Modified,
            orig_path: None,
        },
    );
    assert_eq!(item.path(), "src/lib.rs");
    assert_eq!(item.status_code(), "AM");
    assert!(item.is_staged());
    assert!(item.is_revertible());

    let untracked = TreeItem::create(
        "new.txt".into(),
        TreeItemData {
            staged: FileStatus::Untracked,
            unstaged: FileStatus::Untracked,
            orig_path: None,
        },
    );
    assert!(untracked.is_untracked());
    assert!(!untracked.is_staged());
    assert!(!untracked.is_revertible());
}

#[test]
fn test_reflog_key() {
    assert_eq!(ReflogRecord::key("refs/heads/main", 3), "refs/heads/main@{3}");
}

#[test]
fn test_held_branch_sees_reconciled_fields() {
    let branches: ObjectCollection<Branch> = ObjectCollection::new();
    let data = |target: &str, current: bool| BranchData {
        target: ObjectId::new(target),
        upstream: None,
        is_current: current,
    };

    branches.reconcile(BTreeMap::from([("main".to_string(), data("a1", true))]));
    let held = branches.get("main").expect("main");

    branches.reconcile(BTreeMap::from([("main".to_string(), data("a2", false))]));
    assert!(Arc::ptr_eq(&held, &branches.get("main").expect("main")));
    assert_eq!(held.target(), ObjectId::new("a2"));
    assert!(!held.is_current());

    branches.reconcile(BTreeMap::new());
    assert!(held.is_deleted());
    let err = held.ensure_alive().expect_err("deleted");
    assert_eq!(err.kind(), ErrorKind::State);
    insta::assert_snapshot!(err.to_string(), @"state error: branch 'main' is deleted");
}
