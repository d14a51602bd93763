// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository-level change notifications with a suppression gate.
//!
//! ```text
//! block_notifications(BRANCH | TAG) --> NotificationGuard
//!     counts[BRANCH] += 1, counts[TAG] += 1
//!
//! notify(BRANCH)
//!     counts[BRANCH] > 0 ? pending |= BRANCH : fire(BRANCH)
//!
//! drop(guard)
//!     counts[k] -= 1 for each k
//!     counts[k] == 0 && pending has k --> fire(k) once
//! ```
//!
//! Listeners are always invoked with a single kind and never while the gate
//! lock is held, so a listener may call back into the monitor.


use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use bitflags::bitflags;

bitflags! {
    /// Kinds of repository change a listener can observe.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RepositoryNotifications: u32 {
        const BRANCH_CHANGED = 1 << 0;
        const REMOTE_BRANCH_CHANGED = 1 << 1;
        const TAG_CHANGED = 1 << 2;
        const REMOTE_CHANGED = 1 << 3;
        const SUBMODULES_CHANGED = 1 << 4;
        const INDEX_UPDATED = 1 << 5;
        const WORKTREE_UPDATED = 1 << 6;
        const CONFIG_UPDATED = 1 << 7;
        const REFLOG_CHANGED = 1 << 8;
    }
}

impl RepositoryNotifications {
    /// Every reference kind.
    pub const REFERENCES: Self = Self::BRANCH_CHANGED
        .union(Self::REMOTE_BRANCH_CHANGED)
        .union(Self::TAG_CHANGED);
}

/// Identifies a registered listener for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocates process-unique ids.
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Observer of repository notifications.
pub trait NotificationListener: Send + Sync {
    /// Called once per kind; `kind` always has exactly one bit set.
    fn notify(&self, kind: RepositoryNotifications);
}

impl<F> NotificationListener for F
where
    F: Fn(RepositoryNotifications) + Send + Sync,
{
    fn notify(&self, kind: RepositoryNotifications) {
        self(kind);
    }
}

#[derive(Debug, Default)]
struct GateState {
    counts: [u32; 32],
    pending: RepositoryNotifications,
}

/// Dispatches notifications and owns the suppression gate.
#[derive(Default)]
pub struct RepositoryMonitor {
    gate: Mutex<GateState>,
    listeners: RwLock<Vec<(ListenerId, Arc<dyn NotificationListener>)>>,
}

impl std::fmt::Debug for RepositoryMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryMonitor")
            .field("gate", &*self.lock_gate())
            .finish_non_exhaustive()
    }
}

impl RepositoryMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Arc<dyn NotificationListener>) -> ListenerId {
        let id = ListenerId::next();
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Removes a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Suppresses `kinds` until the returned guard is dropped.
    ///
    /// Scopes nest per kind. Dropping the last scope of a kind fires one
    /// notification for it if anything was suppressed meanwhile.
    #[must_use = "notifications are released as soon as the guard is dropped"]
    pub fn block_notifications(self: &Arc<Self>, kinds: RepositoryNotifications) -> NotificationGuard {
        let mut gate = self.lock_gate();
        for kind in kinds.iter() {
            gate.counts[bit_index(kind)] += 1;
        }
        drop(gate);

        NotificationGuard {
            monitor: Arc::clone(self),
            kinds,
        }
    }

    /// Returns true while at least one scope suppresses `kind`.
    #[must_use]
    pub fn is_blocked(&self, kind: RepositoryNotifications) -> bool {
        let gate = self.lock_gate();
        kind.iter().any(|k| gate.counts[bit_index(k)] > 0)
    }

    /// Announces a change; suppressed kinds are remembered instead.
    pub fn notify(&self, kinds: RepositoryNotifications) {
        let mut fire = RepositoryNotifications::empty();
        {
            let mut gate = self.lock_gate();
            for kind in kinds.iter() {
                if gate.counts[bit_index(kind)] > 0 {
                    gate.pending |= kind;
                } else {
                    fire |= kind;
                }
            }
        }
        self.dispatch(fire);
    }

    fn release(&self, kinds: RepositoryNotifications) {
        let mut fire = RepositoryNotifications::empty();
        {
            let mut gate = self.lock_gate();
            for kind in kinds.iter() {
                let count = &mut gate.counts[bit_index(kind)];
                *count = count.saturating_sub(1);
                if *count == 0 && gate.pending.contains(kind) {
                    gate.pending.remove(kind);
                    fire |= kind;
                }
            }
        }
        self.dispatch(fire);
    }

    fn dispatch(&self, kinds: RepositoryNotifications) {
        if kinds.is_empty() {
            return;
        }
        let listeners: Vec<Arc<dyn NotificationListener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for kind in kinds.iter() {
            tracing::trace!(kind = ?kind, listeners = listeners.len(), "notify");
            for listener in &listeners {
                listener.notify(kind);
            }
        }
    }

    fn lock_gate(&self) -> MutexGuard<'_, GateState> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

const fn bit_index(kind: RepositoryNotifications) -> usize {
    kind.bits().trailing_zeros() as usize
}

/// Scope returned by [`RepositoryMonitor::block_notifications`].
///
/// Released exactly once, when dropped.
#[derive(Debug)]
pub struct NotificationGuard {
    monitor: Arc<RepositoryMonitor>,
    kinds: RepositoryNotifications,
}

impl NotificationGuard {
    #[must_use]
    pub const fn kinds(&self) -> RepositoryNotifications {
        self.kinds
    }
}

impl Drop for NotificationGuard {
    fn drop(&mut self) {
        self.monitor.release(self.kinds);
    }
}
