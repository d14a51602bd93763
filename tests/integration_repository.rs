// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the repository object graph.
//!
//! Drives the public API through multi-step workflows against real
//! temporary repositories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

use repograph::cache::{CollectionListener, DomainObject};
use repograph::config::Config;
use repograph::error::ErrorKind;
use repograph::git::{PushOptions, PushResultType};
use repograph::model::{BranchData, FileStatus, RemoteBranch};
use repograph::refs::{ReferenceChange, ReferenceKinds};
use repograph::repository::Repository;
use tempfile::TempDir;

const IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Test"),
    ("GIT_AUTHOR_EMAIL", "test@example.com"),
    ("GIT_COMMITTER_NAME", "Test"),
    ("GIT_COMMITTER_EMAIL", "test@example.com"),
];

fn git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .envs(IDENTITY)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn config() -> Config {
    let mut config = Config::default();
    config.git.env = IDENTITY
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    config
}

/// Two clones of one bare repository.
struct Clones {
    _temp: TempDir,
    work: PathBuf,
    other: PathBuf,
}

impl Clones {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let seed = temp.path().join("seed");
        fs::create_dir_all(&seed).expect("mkdir");
        git(&["init", "--quiet", "--initial-branch=main"], &seed);
        fs::write(seed.join("README.md"), "# Test\n").expect("write");
        git(&["add", "README.md"], &seed);
        git(&["commit", "--quiet", "-m", "initial"], &seed);
        git(
            &["clone", "--quiet", "--bare", "seed", "upstream.git"],
            temp.path(),
        );
        for name in ["work", "other"] {
            git(&["clone", "--quiet", "upstream.git", name], temp.path());
            git(&["config", "pull.rebase", "false"], &temp.path().join(name));
        }
        Self {
            work: temp.path().join("work"),
            other: temp.path().join("other"),
            _temp: temp,
        }
    }

    fn publish_from_other(&self, file: &str) {
        fs::write(self.other.join(file), "other\n").expect("write");
        git(&["add", file], &self.other);
        git(&["commit", "--quiet", "-m", file], &self.other);
        git(&["push", "--quiet", "origin", "main"], &self.other);
    }
}

async fn open(path: &Path) -> Repository {
    let repo = Repository::open(path, &config()).await.expect("open");
    repo.load().await.expect("load");
    repo
}

#[derive(Default)]
struct RemoteBranchEvents {
    updated: Mutex<Vec<String>>,
    removed: Mutex<Vec<String>>,
}

impl CollectionListener<RemoteBranch> for RemoteBranchEvents {
    fn on_updated(&self, object: &Arc<RemoteBranch>) {
        self.updated.lock().expect("lock").push(object.name());
    }

    fn on_removed(&self, object: &Arc<RemoteBranch>) {
        self.removed.lock().expect("lock").push(object.name());
    }
}

// =============================================================================
// Diverged history
// =============================================================================

#[tokio::test]
async fn rejected_push_then_pull_then_push() {
    let clones = Clones::new();
    let repo = open(&clones.work).await;
    let origin = repo.remotes().get("origin").expect("origin");

    fs::write(clones.work.join("local.txt"), "local\n").expect("write");
    repo.refresh_status().await.expect("status");
    let item = repo.status().get("local.txt").expect("untracked item");
    assert_eq!(item.unstaged_status(), FileStatus::Untracked);
    repo.stage(&[Arc::clone(&item)]).await.expect("stage");
    git(&["commit", "--quiet", "-m", "local"], &clones.work);
    repo.refresh_refs(ReferenceKinds::LOCAL_BRANCH)
        .await
        .expect("refresh");
    repo.refresh_status().await.expect("status");
    assert!(item.is_deleted(), "committed file leaves the status list");

    clones.publish_from_other("other.txt");

    let main = repo.branches().get("main").expect("main");
    let rejected = repo
        .push(&origin, &[Arc::clone(&main)], PushOptions::default())
        .await
        .expect("push reports the rejection");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].kind, PushResultType::Rejected);

    let pulled = repo.pull(&origin).await.expect("merge pull");
    let names: Vec<&str> = pulled.iter().map(ReferenceChange::name).collect();
    assert_eq!(names, vec!["refs/heads/main", "refs/remotes/origin/main"]);
    assert!(clones.work.join("other.txt").exists());

    let pushed = repo
        .push(&origin, &[Arc::clone(&main)], PushOptions::default())
        .await
        .expect("push");
    assert_eq!(pushed[0].kind, PushResultType::FastForward);
    let tracking = repo.remote_branches().get("origin/main").expect("origin/main");
    assert_eq!(tracking.target(), main.target());
}

// =============================================================================
// Collection listeners
// =============================================================================

#[tokio::test]
async fn remote_branch_listener_sees_update_and_removal() {
    let clones = Clones::new();
    git(&["push", "--quiet", "origin", "main:feature"], &clones.other);
    let repo = open(&clones.work).await;
    let origin = repo.remotes().get("origin").expect("origin");
    assert!(repo.remote_branches().get("origin/feature").is_some());

    let events = Arc::new(RemoteBranchEvents::default());
    repo.remote_branches().subscribe(events.clone());

    clones.publish_from_other("next.txt");
    git(&["push", "--quiet", "origin", "--delete", "feature"], &clones.other);

    let fetched = repo.fetch(&origin).await.expect("fetch");
    assert_eq!(fetched.len(), 1);
    assert_eq!(*events.updated.lock().expect("lock"), vec!["origin/main"]);
    assert!(events.removed.lock().expect("lock").is_empty());

    let pruned = repo.prune(&origin).await.expect("prune");
    assert_eq!(pruned.len(), 1);
    assert_eq!(*events.removed.lock().expect("lock"), vec!["origin/feature"]);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_fetches_report_each_move_once() {
    let clones = Clones::new();
    let repo = open(&clones.work).await;
    let origin = repo.remotes().get("origin").expect("origin");
    clones.publish_from_other("next.txt");

    let (first, second) = tokio::join!(repo.fetch(&origin), repo.fetch(&origin));
    let mut changes = first.expect("first fetch");
    changes.extend(second.expect("second fetch"));

    assert_eq!(changes.len(), 1);
    assert!(matches!(
        &changes[0],
        ReferenceChange::Moved { name, .. } if name == "refs/remotes/origin/main"
    ));
}

// =============================================================================
// Reflog
// =============================================================================

#[tokio::test]
async fn reflog_follows_branch_history() {
    let clones = Clones::new();
    let repo = open(&clones.work).await;

    let topic = repo.create_branch("topic", "main").await.expect("create");
    assert_eq!(topic.target(), repo.branches().get("main").expect("main").target());

    let reflog = repo.reflog("refs/heads/topic").await.expect("reflog");
    assert_eq!(reflog.len(), 1);
    let entry = reflog.get("refs/heads/topic@{0}").expect("newest entry");
    assert!(entry.message().contains("branch: Created from main"));

    repo.rename_branch(&topic, "renamed").await.expect("rename");
    assert_eq!(topic.name(), "renamed");
    assert!(repo.branches().get("topic").is_none());
}

// =============================================================================
// Deleted objects
// =============================================================================

#[tokio::test]
async fn deleted_branch_rejects_update() {
    let clones = Clones::new();
    let repo = open(&clones.work).await;
    let topic = repo.create_branch("topic", "main").await.expect("create");
    let target = topic.target();

    let data = topic.data();
    assert!(!topic.update(data.clone()).expect("live branch accepts update"));

    repo.delete_branch(&topic, false).await.expect("delete");
    let err = topic
        .update(BranchData {
            is_current: true,
            ..data
        })
        .expect_err("deleted branch");
    assert_eq!(err.kind(), ErrorKind::State);
    assert_eq!(topic.target(), target);
    assert!(!topic.is_current());
}
