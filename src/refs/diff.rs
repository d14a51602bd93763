// repograph: Git Repository Object Graph
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Difference between two snapshots.

use std::collections::BTreeSet;

use serde::Serialize;

use super::{ObjectId, Snapshot};

/// One reference that changed between two snapshots. Identifiers only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "lowercase")]
pub enum ReferenceChange {
    Added {
        name: String,
        new: ObjectId,
    },
    Removed {
        name: String,
        old: ObjectId,
    },
    Moved {
        name: String,
        old: ObjectId,
        new: ObjectId,
    },
}

impl ReferenceChange {
    /// Full reference name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Added { name, .. } | Self::Removed { name, .. } | Self::Moved { name, .. } => {
                name
            }
        }
    }
}

impl std::fmt::Display for ReferenceChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added { name, new } => write!(f, "+ {name} {}", new.short()),
            Self::Removed { name, old } => write!(f, "- {name} {}", old.short()),
            Self::Moved { name, old, new } => {
                write!(f, "* {name} {}..{}", old.short(), new.short())
            }
        }
    }
}

/// Changes from `old` to `new`: moved, then removed, then added.
///
/// Each group is ordered by reference name; equal positions produce nothing.
#[must_use]
pub fn diff(old: &Snapshot, new: &Snapshot) -> Vec<ReferenceChange> {
    let mut moved = Vec::new();
    let mut removed = Vec::new();
    let mut added = Vec::new();

    let names: BTreeSet<&str> = old.names().chain(new.names()).collect();
    for name in names {
        match (old.get(name), new.get(name)) {
            (Some(before), Some(after)) if before != after => moved.push(ReferenceChange::Moved {
                name: name.to_string(),
                old: before.clone(),
                new: after.clone(),
            }),
            (Some(before), None) => removed.push(ReferenceChange::Removed {
                name: name.to_string(),
                old: before.clone(),
            }),
            (None, Some(after)) => added.push(ReferenceChange::Added {
                name: name.to_string(),
                new: after.clone(),
            }),
            _ => {}
        }
    }

    moved.extend(removed);
    moved.extend(added);
    moved
}
