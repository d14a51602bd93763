// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Keyed, identity-stable object store with change events.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::object::DomainObject;
use super::reconcile::{CollectionEvent, ReconcileReport, reconcile_map};
use crate::error::{RepoResult, StateError};
use crate::notify::{ListenerId, RepositoryMonitor, RepositoryNotifications};

/// Observer of one collection. Every method defaults to a no-op.
pub trait CollectionListener<T>: Send + Sync {
    fn on_added(&self, _object: &Arc<T>) {}

    fn on_updated(&self, _object: &Arc<T>) {}

    fn on_removed(&self, _object: &Arc<T>) {}

    fn on_renamed(&self, _object: &Arc<T>, _old_name: &str) {}
}

type Listeners<T> = Vec<(ListenerId, Arc<dyn CollectionListener<T>>)>;

/// Collection of domain objects keyed by name.
///
/// The object map is guarded by a single writer lock, taken only for a
/// structural mutation and never held while listeners run or git executes.
pub struct ObjectCollection<T: DomainObject> {
    objects: RwLock<BTreeMap<String, Arc<T>>>,
    listeners: RwLock<Listeners<T>>,
    notification: Option<(Arc<RepositoryMonitor>, RepositoryNotifications)>,
}

impl<T: DomainObject> Default for ObjectCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DomainObject> std::fmt::Debug for ObjectCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectCollection")
            .field("kind", &T::KIND)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T: DomainObject> ObjectCollection<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            listeners: RwLock::new(Vec::new()),
            notification: None,
        }
    }

    /// Collection that announces changes as `kind` on `monitor`.
    #[must_use]
    pub fn with_notification(
        monitor: Arc<RepositoryMonitor>,
        kind: RepositoryNotifications,
    ) -> Self {
        Self {
            notification: Some((monitor, kind)),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        self.read().get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// All objects in key order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.read().values().cloned().collect()
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// First object, in key order, matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<Arc<T>> {
        self.read()
            .values()
            .find(|object| predicate(object))
            .cloned()
    }

    pub fn subscribe(&self, listener: Arc<dyn CollectionListener<T>>) -> ListenerId {
        let id = ListenerId::next();
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Applies a fresh snapshot: update in place, add, remove.
    ///
    /// Objects present before and after keep their identity. Events fire
    /// after the writer lock is released.
    pub fn reconcile(&self, fresh: BTreeMap<String, T::Data>) -> ReconcileReport {
        let events = {
            let mut objects = self.write();
            reconcile_map(&mut objects, fresh)
        };

        let report = ReconcileReport::from_events(&events);
        debug!(
            kind = T::KIND,
            updated = report.updated.len(),
            added = report.added.len(),
            removed = report.removed.len(),
            "reconciled"
        );
        self.dispatch(events);
        report
    }

    /// Adds a single object for a key that must not exist yet.
    ///
    /// # Errors
    ///
    /// `StateError::AlreadyExists` if the key is taken.
    pub fn insert(&self, name: impl Into<String>, data: T::Data) -> RepoResult<Arc<T>> {
        let name = name.into();
        let object = {
            let mut objects = self.write();
            if objects.contains_key(&name) {
                return Err(StateError::AlreadyExists {
                    kind: T::KIND,
                    name,
                }
                .into());
            }
            let object = Arc::new(T::create(name.clone(), data));
            objects.insert(name, Arc::clone(&object));
            object
        };
        self.dispatch(vec![CollectionEvent::Added(Arc::clone(&object))]);
        Ok(object)
    }

    /// Removes and marks deleted the object under `name`.
    pub fn remove(&self, name: &str) -> Option<Arc<T>> {
        let object = self.write().remove(name)?;
        object.lifetime().mark_deleted();
        self.dispatch(vec![CollectionEvent::Removed(Arc::clone(&object))]);
        Some(object)
    }

    /// Moves the object under `old_name` to `new_name`, keeping its identity.
    ///
    /// # Errors
    ///
    /// `StateError::NotFound` if `old_name` is absent and
    /// `StateError::AlreadyExists` if `new_name` is taken.
    pub fn rename(&self, old_name: &str, new_name: impl Into<String>) -> RepoResult<Arc<T>> {
        let new_name = new_name.into();
        let object = {
            let mut objects = self.write();
            if objects.contains_key(&new_name) {
                return Err(StateError::AlreadyExists {
                    kind: T::KIND,
                    name: new_name,
                }
                .into());
            }
            let object = objects.remove(old_name).ok_or_else(|| StateError::NotFound {
                kind: T::KIND,
                name: old_name.to_string(),
            })?;
            object.lifetime().set_name(new_name.clone());
            objects.insert(new_name, Arc::clone(&object));
            object
        };
        self.dispatch(vec![CollectionEvent::Renamed {
            object: Arc::clone(&object),
            old_name: old_name.to_string(),
        }]);
        Ok(object)
    }

    /// Removes every object, in key order.
    pub fn clear(&self) -> ReconcileReport {
        self.reconcile(BTreeMap::new())
    }

    fn dispatch(&self, events: Vec<CollectionEvent<T>>) {
        if events.is_empty() {
            return;
        }

        let listeners: Vec<Arc<dyn CollectionListener<T>>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for event in &events {
            for listener in &listeners {
                match event {
                    CollectionEvent::Added(object) => listener.on_added(object),
                    CollectionEvent::Updated(object) => listener.on_updated(object),
                    CollectionEvent::Removed(object) => listener.on_removed(object),
                    CollectionEvent::Renamed { object, old_name } => {
                        listener.on_renamed(object, old_name);
                    }
                }
            }
        }

        if let Some((monitor, kind)) = &self.notification {
            monitor.notify(*kind);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<T>>> {
        self.objects.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Arc<T>>> {
        self.objects.write().unwrap_or_else(PoisonError::into_inner)
    }
}
