// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository context: the object graph of one work tree.
//!
//! ```text
//! Repository (Clone, Arc inner)
//!   git: GitCli ---------------------------> git process
//!   monitor: RepositoryMonitor               notification gate
//!   branches / remote_branches / tags        ObjectCollection<...>
//!   remotes / submodules / status            ObjectCollection<...>
//!   reflogs: ref -> ObjectCollection<ReflogRecord>
//!   remote listeners                         fetch/pull/prune diffs
//!
//! mutating call (fetch):
//!   Snapshot::capture --> gate --> git fetch --> drop gate
//!     --> refresh (reconcile) --> Snapshot::capture --> diff --> listeners
//! ```
//!
//! There is no global repository: open as many as needed, each with its own
//! collections, monitor and listeners. Refreshing a collection parses git
//! output completely before reconciling, so a parse failure leaves it as it
//! was.

mod refs;
mod reflog;
mod remotes;
mod status;
mod submodules;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, info};

use crate::cache::{DomainObject, ObjectCollection};
use crate::config::Config;
use crate::config::types::OperationsConfig;
use crate::error::{ConfigError, RepoResult};
use crate::git::GitCli;
use crate::git::parse::{MIN_VERSION, RefMaps, remotes_from_config, submodules_from_config};
use crate::model::{Branch, ReflogRecord, Remote, RemoteBranch, Submodule, Tag, TreeItem};
use crate::notify::{ListenerId, RepositoryMonitor, RepositoryNotifications};
use crate::refs::{ReferenceChange, ReferenceKinds, Snapshot};

pub use remotes::RemoteOperationListener;

type RemoteListeners = Vec<(ListenerId, Arc<dyn RemoteOperationListener>)>;

struct Inner {
    git: GitCli,
    operations: OperationsConfig,
    monitor: Arc<RepositoryMonitor>,
    branches: ObjectCollection<Branch>,
    remote_branches: ObjectCollection<RemoteBranch>,
    tags: ObjectCollection<Tag>,
    remotes: ObjectCollection<Remote>,
    submodules: ObjectCollection<Submodule>,
    status: ObjectCollection<TreeItem>,
    reflogs: Mutex<BTreeMap<String, Arc<ObjectCollection<ReflogRecord>>>>,
    remote_listeners: RwLock<RemoteListeners>,
    /// Held by fetch, pull, push and prune when mutations are serialized.
    mutations: tokio::sync::Mutex<()>,
}

/// Handle to one repository's object graph. Clones share the graph.
#[derive(Clone)]
pub struct Repository {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("work_dir", &self.work_dir())
            .field("branches", &self.inner.branches.len())
            .field("remotes", &self.inner.remotes.len())
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Opens the work tree containing `path`.
    ///
    /// Collections start empty; call [`load`](Self::load) to populate them.
    ///
    /// # Errors
    ///
    /// - `LaunchError` if git cannot be found.
    /// - `ConfigError::UnsupportedVersion` if `git.check_version` is set and
    ///   git is older than the supported minimum.
    /// - `ConfigError::NotARepository` if `path` is not inside a work tree.
    pub async fn open(path: impl AsRef<Path>, config: &Config) -> RepoResult<Self> {
        let path = path.as_ref();
        let probe = GitCli::new(path, &config.git, &config.operations)?;

        if config.git.check_version {
            let version = probe.version().await?;
            if !version.is_supported() {
                return Err(ConfigError::UnsupportedVersion {
                    found: version.to_string(),
                    required: MIN_VERSION.to_string(),
                }
                .into());
            }
            debug!(%version, "git version");
        }

        let top = probe.show_toplevel().await?;
        info!(path = %top.display(), "opened repository");
        Ok(Self::with_git(probe.with_work_dir(top), config.operations))
    }

    /// Repository over an already resolved accessor. Performs no I/O.
    #[must_use]
    pub fn with_git(git: GitCli, operations: OperationsConfig) -> Self {
        let monitor = Arc::new(RepositoryMonitor::new());
        let inner = Inner {
            git,
            operations,
            branches: collection(&monitor, RepositoryNotifications::BRANCH_CHANGED),
            remote_branches: collection(&monitor, RepositoryNotifications::REMOTE_BRANCH_CHANGED),
            tags: collection(&monitor, RepositoryNotifications::TAG_CHANGED),
            remotes: collection(&monitor, RepositoryNotifications::REMOTE_CHANGED),
            submodules: collection(&monitor, RepositoryNotifications::SUBMODULES_CHANGED),
            status: collection(&monitor, RepositoryNotifications::WORKTREE_UPDATED),
            monitor,
            reflogs: Mutex::new(BTreeMap::new()),
            remote_listeners: RwLock::new(Vec::new()),
            mutations: tokio::sync::Mutex::new(()),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    #[must_use]
    pub fn work_dir(&self) -> &Path {
        self.inner.git.work_dir()
    }

    #[must_use]
    pub fn git(&self) -> &GitCli {
        &self.inner.git
    }

    #[must_use]
    pub fn monitor(&self) -> &Arc<RepositoryMonitor> {
        &self.inner.monitor
    }

    #[must_use]
    pub fn branches(&self) -> &ObjectCollection<Branch> {
        &self.inner.branches
    }

    #[must_use]
    pub fn remote_branches(&self) -> &ObjectCollection<RemoteBranch> {
        &self.inner.remote_branches
    }

    #[must_use]
    pub fn tags(&self) -> &ObjectCollection<Tag> {
        &self.inner.tags
    }

    #[must_use]
    pub fn remotes(&self) -> &ObjectCollection<Remote> {
        &self.inner.remotes
    }

    #[must_use]
    pub fn submodules(&self) -> &ObjectCollection<Submodule> {
        &self.inner.submodules
    }

    /// Changed, untracked and conflicted paths of the work tree.
    #[must_use]
    pub fn status(&self) -> &ObjectCollection<TreeItem> {
        &self.inner.status
    }

    /// Branch checked out in the work tree, if HEAD is not detached.
    #[must_use]
    pub fn current_branch(&self) -> Option<Arc<Branch>> {
        self.inner.branches.find(Branch::is_current)
    }

    // --- refresh ---

    /// Refreshes every collection.
    ///
    /// # Errors
    ///
    /// The first git or parse failure; collections refreshed before it keep
    /// their new state, the rest keep their old one.
    pub async fn load(&self) -> RepoResult<()> {
        self.refresh_refs(ReferenceKinds::all()).await?;
        self.refresh_remotes().await?;
        self.refresh_submodules().await?;
        self.refresh_status().await?;
        debug!(
            branches = self.inner.branches.len(),
            remote_branches = self.inner.remote_branches.len(),
            tags = self.inner.tags.len(),
            remotes = self.inner.remotes.len(),
            submodules = self.inner.submodules.len(),
            status = self.inner.status.len(),
            "loaded"
        );
        Ok(())
    }

    /// Reconciles the reference collections of `kinds` with one
    /// `for-each-ref` call.
    ///
    /// # Errors
    ///
    /// Git or parse failure; no collection is touched then.
    pub async fn refresh_refs(&self, kinds: ReferenceKinds) -> RepoResult<()> {
        self.reload_refs(kinds).await.map(|_| ())
    }

    /// Refreshes `kinds` and returns the positions it reconciled against.
    async fn reload_refs(&self, kinds: ReferenceKinds) -> RepoResult<Snapshot> {
        let records = self.inner.git.for_each_ref(kinds).await?;
        let snapshot = Snapshot::from_records(kinds, &records);
        let maps = RefMaps::from_records(records);
        if kinds.contains(ReferenceKinds::LOCAL_BRANCH) {
            self.inner.branches.reconcile(maps.branches);
        }
        if kinds.contains(ReferenceKinds::REMOTE_BRANCH) {
            self.inner.remote_branches.reconcile(maps.remote_branches);
        }
        if kinds.contains(ReferenceKinds::TAG) {
            self.inner.tags.reconcile(maps.tags);
        }
        Ok(snapshot)
    }

    /// # Errors
    ///
    /// Git or parse failure; the collection is untouched then.
    pub async fn refresh_remotes(&self) -> RepoResult<()> {
        let entries = self.inner.git.remote_config().await?;
        self.inner.remotes.reconcile(remotes_from_config(&entries));
        Ok(())
    }

    /// # Errors
    ///
    /// Git or parse failure; the collection is untouched then.
    pub async fn refresh_submodules(&self) -> RepoResult<()> {
        let entries = self.inner.git.gitmodules().await?;
        self.inner
            .submodules
            .reconcile(submodules_from_config(&entries));
        Ok(())
    }

    /// # Errors
    ///
    /// Git or parse failure; the collection is untouched then.
    pub async fn refresh_status(&self) -> RepoResult<()> {
        let items = self.inner.git.status().await?;
        self.inner.status.reconcile(items);
        Ok(())
    }

    // --- remote operation listeners ---

    pub fn subscribe_remote_operations(
        &self,
        listener: Arc<dyn RemoteOperationListener>,
    ) -> ListenerId {
        let id = ListenerId::next();
        self.inner
            .remote_listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    pub fn unsubscribe_remote_operations(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .inner
            .remote_listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Calls `f` for every remote listener, outside the listener lock.
    fn dispatch_remote(&self, f: impl Fn(&dyn RemoteOperationListener)) {
        let listeners: Vec<Arc<dyn RemoteOperationListener>> = self
            .inner
            .remote_listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in &listeners {
            f(listener.as_ref());
        }
    }

    /// Mutation slot; `None` when mutations may overlap.
    async fn serialize_mutation(&self) -> Option<tokio::sync::MutexGuard<'_, ()>> {
        if self.inner.operations.serialize_mutations {
            Some(self.inner.mutations.lock().await)
        } else {
            None
        }
    }

    fn log_changes(operation: &'static str, remote: &str, changes: &[ReferenceChange]) {
        info!(operation, remote, changes = changes.len(), "remote operation finished");
        for change in changes {
            debug!(operation, %change);
        }
    }

    fn reflog_collection(&self, reference: &str) -> Arc<ObjectCollection<ReflogRecord>> {
        let mut reflogs = self
            .inner
            .reflogs
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(reflogs.entry(reference.to_string()).or_insert_with(|| {
            Arc::new(collection(
                &self.inner.monitor,
                RepositoryNotifications::REFLOG_CHANGED,
            ))
        }))
    }

    /// Forgets the reflog of a deleted or renamed reference; held records
    /// become deleted.
    fn drop_reflog(&self, full_name: &str) {
        let dropped = self
            .inner
            .reflogs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(full_name);
        if let Some(reflog) = dropped {
            reflog.clear();
        }
    }

    fn paths_of(items: &[Arc<TreeItem>]) -> Vec<String> {
        items.iter().map(|item| item.path()).collect()
    }
}

fn collection<T: DomainObject>(
    monitor: &Arc<RepositoryMonitor>,
    kind: RepositoryNotifications,
) -> ObjectCollection<T> {
    ObjectCollection::with_notification(Arc::clone(monitor), kind)
}
