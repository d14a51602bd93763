// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reconciliation of a keyed cache against a fresh snapshot.
//!
//! ```text
//! cache keys   fresh keys
//!     A ---------- A      apply() changed?  --> Updated(A)
//!     B                                     --> Removed(B), marked deleted
//!                  C      create()          --> Added(C)
//!
//! event order: updates, adds, removes; each in key order
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use super::object::DomainObject;

/// One structural change of a collection.
#[derive(Debug)]
pub enum CollectionEvent<T> {
    Added(Arc<T>),
    Updated(Arc<T>),
    Removed(Arc<T>),
    Renamed { object: Arc<T>, old_name: String },
}

/// Summary of a reconciliation pass, by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub updated: Vec<String>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ReconcileReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.updated.len() + self.added.len() + self.removed.len()
    }

    pub(super) fn from_events<T: DomainObject>(events: &[CollectionEvent<T>]) -> Self {
        let mut report = Self::default();
        for event in events {
            match event {
                CollectionEvent::Updated(object) => report.updated.push(object.name()),
                CollectionEvent::Added(object) => report.added.push(object.name()),
                CollectionEvent::Removed(object) => report.removed.push(object.name()),
                CollectionEvent::Renamed { .. } => {}
            }
        }
        report
    }
}

/// Brings `objects` in line with `fresh`, mutating matched objects in place.
///
/// Returns the events of the pass in dispatch order. Calling it twice with
/// the same `fresh` yields no events the second time.
pub fn reconcile_map<T: DomainObject>(
    objects: &mut BTreeMap<String, Arc<T>>,
    fresh: BTreeMap<String, T::Data>,
) -> Vec<CollectionEvent<T>> {
    let stale: Vec<String> = objects
        .keys()
        .filter(|key| !fresh.contains_key(*key))
        .cloned()
        .collect();

    let mut updated = Vec::new();
    let mut added = Vec::new();
    for (key, data) in fresh {
        if let Some(existing) = objects.get(&key) {
            if existing.cell().replace(data) {
                updated.push(CollectionEvent::Updated(Arc::clone(existing)));
            }
        } else {
            let object = Arc::new(T::create(key.clone(), data));
            objects.insert(key, Arc::clone(&object));
            added.push(CollectionEvent::Added(object));
        }
    }

    let removed = stale.into_iter().filter_map(|key| {
        objects.remove(&key).map(|object| {
            object.lifetime().mark_deleted();
            CollectionEvent::Removed(object)
        })
    });

    updated.into_iter().chain(added).chain(removed).collect()
}
