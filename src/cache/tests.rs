// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::{CollectionListener, DomainObject, ObjectCell, ObjectCollection, domain_object};
use crate::error::{ErrorKind, RepoError, StateError};
use crate::notify::{RepositoryMonitor, RepositoryNotifications};

struct Item(ObjectCell<u32>);
domain_object!(Item, u32, "item");

fn fresh(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_string(), *value))
        .collect()
}

#[derive(Default)]
struct EventLog(Mutex<Vec<String>>);

impl EventLog {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().expect("lock"))
    }
}

impl CollectionListener<Item> for EventLog {
    fn on_added(&self, object: &Arc<Item>) {
        self.0.lock().expect("lock").push(format!("added {}", object.name()));
    }

    fn on_updated(&self, object: &Arc<Item>) {
        self.0
            .lock()
            .expect("lock")
            .push(format!("updated {}={}", object.name(), object.data()));
    }

    fn on_removed(&self, object: &Arc<Item>) {
        self.0
            .lock()
            .expect("lock")
            .push(format!("removed {}", object.name()));
    }

    fn on_renamed(&self, object: &Arc<Item>, old_name: &str) {
        self.0
            .lock()
            .expect("lock")
            .push(format!("renamed {old_name}->{}", object.name()));
    }
}

fn observed() -> (ObjectCollection<Item>, Arc<EventLog>) {
    let collection = ObjectCollection::new();
    let log = Arc::new(EventLog::default());
    collection.subscribe(log.clone());
    (collection, log)
}

#[test]
fn test_reconcile_partitions_and_orders_events() {
    let (collection, log) = observed();
    collection.reconcile(fresh(&[("b", 1), ("d", 1), ("e", 1)]));
    log.take();

    let report = collection.reconcile(fresh(&[("a", 0), ("b", 2), ("c", 0), ("d", 1)]));

    assert_eq!(report.updated, vec!["b"]);
    assert_eq!(report.added, vec!["a", "c"]);
    assert_eq!(report.removed, vec!["e"]);
    assert_eq!(
        log.take(),
        vec!["updated b=2", "added a", "added c", "removed e"]
    );
    assert_eq!(collection.names(), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_reconcile_preserves_identity() {
    let collection = ObjectCollection::<Item>::new();
    collection.reconcile(fresh(&[("master", 1)]));
    let before = collection.get("master").expect("present");

    collection.reconcile(fresh(&[("master", 7)]));
    let after = collection.get("master").expect("present");

    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(before.data(), 7);
}

#[test]
fn test_reconcile_is_idempotent() {
    let (collection, log) = observed();
    let snapshot = fresh(&[("x", 1), ("y", 2)]);
    collection.reconcile(snapshot.clone());
    log.take();

    let report = collection.reconcile(snapshot);
    assert!(report.is_empty());
    assert!(log.take().is_empty());
}

#[test]
fn test_removed_object_is_guarded() {
    let collection = ObjectCollection::<Item>::new();
    collection.reconcile(fresh(&[("gone", 1)]));
    let held = collection.get("gone").expect("present");

    collection.reconcile(BTreeMap::new());

    assert!(held.is_deleted());
    let err = held.update(5).expect_err("deleted object");
    assert_eq!(err.kind(), ErrorKind::State);
    assert!(matches!(
        err,
        RepoError::State(ref state) if matches!(**state, StateError::Deleted { kind: "item", .. })
    ));
    assert_eq!(held.data(), 1);
}

#[test]
fn test_failed_parse_leaves_cache_untouched() {
    fn parse(text: &str) -> Result<BTreeMap<String, u32>, std::num::ParseIntError> {
        text.lines()
            .map(|line| -> Result<(String, u32), std::num::ParseIntError> {
                let (name, value) = line.split_once(' ').unwrap_or((line, ""));
                Ok((name.to_string(), value.parse()?))
            })
            .collect()
    }

    let (collection, log) = observed();
    collection.reconcile(parse("a 1\nb 2").expect("valid"));
    let before: Vec<Arc<Item>> = collection.snapshot();
    log.take();

    if let Ok(map) = parse("a 1\nb oops") {
        collection.reconcile(map);
    }

    let after = collection.snapshot();
    assert_eq!(before.len(), after.len());
    assert!(before.iter().zip(&after).all(|(x, y)| Arc::ptr_eq(x, y)));
    assert!(log.take().is_empty());
}

#[test]
fn test_rename_moves_same_instance() {
    let (collection, log) = observed();
    collection.reconcile(fresh(&[("old", 3), ("other", 4)]));
    let held = collection.get("old").expect("present");
    log.take();

    let renamed = collection.rename("old", "new").expect("rename works");

    assert!(Arc::ptr_eq(&held, &renamed));
    assert_eq!(held.name(), "new");
    assert!(!held.is_deleted());
    assert!(collection.get("old").is_none());
    assert_eq!(log.take(), vec!["renamed old->new"]);

    let taken = collection.rename("new", "other").expect_err("target exists");
    assert_eq!(taken.kind(), ErrorKind::State);
    let missing = collection.rename("absent", "x").expect_err("source missing");
    assert_eq!(missing.kind(), ErrorKind::State);
}

#[test]
fn test_insert_and_remove() {
    let (collection, log) = observed();
    let created = collection.insert("t1", 9).expect("new key");
    assert!(collection.insert("t1", 10).is_err());

    let removed = collection.remove("t1").expect("present");
    assert!(Arc::ptr_eq(&created, &removed));
    assert!(created.is_deleted());
    assert!(collection.remove("t1").is_none());
    assert_eq!(log.take(), vec!["added t1", "removed t1"]);
}

#[test]
fn test_unsubscribed_listener_sees_nothing() {
    let collection = ObjectCollection::<Item>::new();
    let log = Arc::new(EventLog::default());
    let id = collection.subscribe(log.clone());
    assert!(collection.unsubscribe(id));

    collection.reconcile(fresh(&[("a", 1)]));
    assert!(log.take().is_empty());
}

#[test]
fn test_changes_reach_repository_monitor() {
    let monitor = Arc::new(RepositoryMonitor::new());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    monitor.subscribe(Arc::new(move |kind: RepositoryNotifications| {
        sink.lock().expect("lock").push(kind);
    }));

    let collection = ObjectCollection::<Item>::with_notification(
        Arc::clone(&monitor),
        RepositoryNotifications::TAG_CHANGED,
    );

    {
        let _gate = monitor.block_notifications(RepositoryNotifications::TAG_CHANGED);
        collection.reconcile(fresh(&[("v1", 1)]));
        collection.reconcile(fresh(&[("v1", 1), ("v2", 2)]));
        assert!(seen.lock().expect("lock").is_empty());
    }
    // Unchanged pass does not notify
    collection.reconcile(fresh(&[("v1", 1), ("v2", 2)]));

    assert_eq!(
        *seen.lock().expect("lock"),
        vec![RepositoryNotifications::TAG_CHANGED]
    );
}
